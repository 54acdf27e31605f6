//! Typed benchmark records and the static keys that identify repeated trials
//! of the same experiment.
//!
//! Each category is a distinct struct so numeric columns stay numeric all the
//! way to the report; [`LogRecord`] is the closed union over the three.
//! Measured quantities (`ram`, `time`, `proof`) are `Option<u64>` because the
//! empty string is the accepted "unset" sentinel on the wire.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::schema::Category;

/// Circuit lifecycle stages, as emitted by the framework drivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitOp {
    Compile,
    Setup,
    Witness,
    Prove,
    Verify,
}

impl CircuitOp {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "compile" => Some(CircuitOp::Compile),
            "setup" => Some(CircuitOp::Setup),
            "witness" => Some(CircuitOp::Witness),
            "prove" => Some(CircuitOp::Prove),
            "verify" => Some(CircuitOp::Verify),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CircuitOp::Compile => "compile",
            CircuitOp::Setup => "setup",
            CircuitOp::Witness => "witness",
            CircuitOp::Prove => "prove",
            CircuitOp::Verify => "verify",
        }
    }
}

/// Field arithmetic operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Inv,
    Exp,
}

impl ArithmeticOp {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "add" => Some(ArithmeticOp::Add),
            "sub" => Some(ArithmeticOp::Sub),
            "mul" => Some(ArithmeticOp::Mul),
            "inv" => Some(ArithmeticOp::Inv),
            "exp" => Some(ArithmeticOp::Exp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Mul => "mul",
            ArithmeticOp::Inv => "inv",
            ArithmeticOp::Exp => "exp",
        }
    }
}

/// Elliptic-curve group operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EcOp {
    ScalarMultiplication,
    MultiScalarMultiplication,
    Pairing,
}

impl EcOp {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "scalar-multiplication" => Some(EcOp::ScalarMultiplication),
            "multi-scalar-multiplication" => Some(EcOp::MultiScalarMultiplication),
            "pairing" => Some(EcOp::Pairing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EcOp::ScalarMultiplication => "scalar-multiplication",
            EcOp::MultiScalarMultiplication => "multi-scalar-multiplication",
            EcOp::Pairing => "pairing",
        }
    }
}

/// A typed log row that can be collapsed with repeated trials of the same
/// experiment.
///
/// `Key` covers every field except the measured quantities; two records with
/// equal keys are trials of one experiment. `CountKey` is the coarser
/// grouping used by the repetition-count consistency check, `None` where the
/// category does not enforce it.
pub trait Experiment: Clone {
    const CATEGORY: Category;

    type Key: Clone + Eq + Hash + fmt::Debug;
    type CountKey: Clone + Eq + Hash + fmt::Debug;

    fn static_key(&self) -> Self::Key;
    fn count_key(&self) -> Option<Self::CountKey>;

    fn time(&self) -> Option<u64>;
    fn ram(&self) -> Option<u64>;
    fn count(&self) -> u64;

    /// Overwrite the measured quantities with their merged values.
    fn set_measures(&mut self, time: Option<u64>, ram: Option<u64>, count: u64);
}

/// One parsed row of a circuit benchmark log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CircuitRecord {
    pub framework: String,
    pub backend: String,
    pub curve: String,
    pub circuit: String,
    #[serde(rename = "input")]
    pub input_path: String,
    pub operation: CircuitOp,
    #[serde(rename = "nbConstraints")]
    pub nb_constraints: u64,
    #[serde(rename = "nbSecret")]
    pub nb_secret: u64,
    #[serde(rename = "nbPublic")]
    pub nb_public: u64,
    pub ram: Option<u64>,
    pub time: Option<u64>,
    #[serde(rename = "proofSize")]
    pub proof: Option<u64>,
    #[serde(rename = "nbPhysicalCores")]
    pub nb_physical_cores: u64,
    #[serde(rename = "nbLogicalCores")]
    pub nb_logical_cores: u64,
    pub count: u64,
    pub cpu: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CircuitKey {
    framework: String,
    backend: String,
    curve: String,
    circuit: String,
    input_path: String,
    operation: CircuitOp,
    nb_constraints: u64,
    nb_secret: u64,
    nb_public: u64,
    nb_physical_cores: u64,
    nb_logical_cores: u64,
    count: u64,
    cpu: String,
}

impl Experiment for CircuitRecord {
    const CATEGORY: Category = Category::Circuit;

    type Key = CircuitKey;
    // Per-framework repetition counts legitimately differ for circuits, so
    // the count check is relaxed for this category.
    type CountKey = ();

    fn static_key(&self) -> CircuitKey {
        CircuitKey {
            framework: self.framework.clone(),
            backend: self.backend.clone(),
            curve: self.curve.clone(),
            circuit: self.circuit.clone(),
            input_path: self.input_path.clone(),
            operation: self.operation,
            nb_constraints: self.nb_constraints,
            nb_secret: self.nb_secret,
            nb_public: self.nb_public,
            nb_physical_cores: self.nb_physical_cores,
            nb_logical_cores: self.nb_logical_cores,
            count: self.count,
            cpu: self.cpu.clone(),
        }
    }

    fn count_key(&self) -> Option<()> {
        None
    }

    fn time(&self) -> Option<u64> {
        self.time
    }

    fn ram(&self) -> Option<u64> {
        self.ram
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn set_measures(&mut self, time: Option<u64>, ram: Option<u64>, count: u64) {
        self.time = time;
        self.ram = ram;
        self.count = count;
    }
}

/// One parsed row of a field-arithmetic benchmark log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArithmeticRecord {
    pub framework: String,
    pub curve: String,
    pub field: String,
    pub operation: ArithmeticOp,
    #[serde(rename = "input")]
    pub input_path: String,
    pub ram: Option<u64>,
    pub time: Option<u64>,
    #[serde(rename = "nbPhysicalCores")]
    pub nb_physical_cores: u64,
    #[serde(rename = "nbLogicalCores")]
    pub nb_logical_cores: u64,
    pub count: u64,
    pub cpu: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArithmeticKey {
    framework: String,
    curve: String,
    field: String,
    operation: ArithmeticOp,
    input_path: String,
    nb_physical_cores: u64,
    nb_logical_cores: u64,
    count: u64,
    cpu: String,
}

impl Experiment for ArithmeticRecord {
    const CATEGORY: Category = Category::Arithmetic;

    type Key = ArithmeticKey;
    type CountKey = (String, String, ArithmeticOp);

    fn static_key(&self) -> ArithmeticKey {
        ArithmeticKey {
            framework: self.framework.clone(),
            curve: self.curve.clone(),
            field: self.field.clone(),
            operation: self.operation,
            input_path: self.input_path.clone(),
            nb_physical_cores: self.nb_physical_cores,
            nb_logical_cores: self.nb_logical_cores,
            count: self.count,
            cpu: self.cpu.clone(),
        }
    }

    fn count_key(&self) -> Option<(String, String, ArithmeticOp)> {
        Some((self.field.clone(), self.input_path.clone(), self.operation))
    }

    fn time(&self) -> Option<u64> {
        self.time
    }

    fn ram(&self) -> Option<u64> {
        self.ram
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn set_measures(&mut self, time: Option<u64>, ram: Option<u64>, count: u64) {
        self.time = time;
        self.ram = ram;
        self.count = count;
    }
}

/// One parsed row of an elliptic-curve benchmark log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EcRecord {
    pub framework: String,
    pub curve: String,
    pub operation: EcOp,
    #[serde(rename = "input")]
    pub input_path: String,
    pub ram: Option<u64>,
    pub time: Option<u64>,
    #[serde(rename = "nbPhysicalCores")]
    pub nb_physical_cores: u64,
    #[serde(rename = "nbLogicalCores")]
    pub nb_logical_cores: u64,
    pub count: u64,
    pub cpu: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EcKey {
    framework: String,
    curve: String,
    operation: EcOp,
    input_path: String,
    nb_physical_cores: u64,
    nb_logical_cores: u64,
    count: u64,
    cpu: String,
}

impl Experiment for EcRecord {
    const CATEGORY: Category = Category::Ec;

    type Key = EcKey;
    type CountKey = (String, EcOp);

    fn static_key(&self) -> EcKey {
        EcKey {
            framework: self.framework.clone(),
            curve: self.curve.clone(),
            operation: self.operation,
            input_path: self.input_path.clone(),
            nb_physical_cores: self.nb_physical_cores,
            nb_logical_cores: self.nb_logical_cores,
            count: self.count,
            cpu: self.cpu.clone(),
        }
    }

    fn count_key(&self) -> Option<(String, EcOp)> {
        Some((self.input_path.clone(), self.operation))
    }

    fn time(&self) -> Option<u64> {
        self.time
    }

    fn ram(&self) -> Option<u64> {
        self.ram
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn set_measures(&mut self, time: Option<u64>, ram: Option<u64>, count: u64) {
        self.time = time;
        self.ram = ram;
        self.count = count;
    }
}

/// One parsed line of a benchmark log, tagged by category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogRecord {
    Circuit(CircuitRecord),
    Arithmetic(ArithmeticRecord),
    Ec(EcRecord),
}

impl LogRecord {
    pub fn category(&self) -> Category {
        match self {
            LogRecord::Circuit(_) => Category::Circuit,
            LogRecord::Arithmetic(_) => Category::Arithmetic,
            LogRecord::Ec(_) => Category::Ec,
        }
    }
}
