//! Behavioural 32-bit ALU and its self-checking testbench.
//!
//! The [`Alu`] implements the RV32I integer register-register operations. The
//! [`AluBench`] model wraps it the way an RTL testbench wraps a DUT: each
//! evaluation applies one directed vector, checks the output against the
//! expected value and, once the vectors run out, raises finish.
//!
//! Runtime arguments understood by the bench:
//! * `+verbose`: log every applied vector.
//! * `+vectors=N`: apply only the first `N` directed vectors (`N >= 1`).

use std::fmt;

use tracing::{info, warn};

use crate::common::{ModelError, SimError};
use crate::sim::{Model, SimContext};

/// Registry name of the bench.
pub const NAME: &str = "alu";

/// Shift amounts use the low five bits of the second operand.
const SHAMT_MASK: u32 = 0x1F;

/// ALU operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Logical shift left.
    Sll,
    /// Logical shift right.
    Srl,
    /// Arithmetic shift right.
    Sra,
    /// Signed set-less-than.
    Slt,
    /// Unsigned set-less-than.
    Sltu,
}

impl AluOp {
    /// Every operation, in encoding order.
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Sll,
        Self::Srl,
        Self::Sra,
        Self::Slt,
        Self::Sltu,
    ];

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Combinational 32-bit integer ALU.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alu;

impl Alu {
    /// Computes `a op b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tbsim_core::models::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Sltu, -5_i32 as u32, 10), 0);
    /// ```
    pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        let shamt = b & SHAMT_MASK;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
            AluOp::Sll => a << shamt,
            AluOp::Srl => a >> shamt,
            AluOp::Sra => ((a as i32) >> shamt) as u32,
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            AluOp::Sltu => (a < b) as u32,
        }
    }
}

/// One directed stimulus with its expected response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// Operation to apply.
    pub op: AluOp,
    /// First operand.
    pub a: u32,
    /// Second operand.
    pub b: u32,
    /// Expected ALU output.
    pub expected: u32,
}

impl Vector {
    /// Creates a vector.
    pub const fn new(op: AluOp, a: u32, b: u32, expected: u32) -> Self {
        Self { op, a, b, expected }
    }
}

/// Directed vectors applied by the bench, in order.
pub const DIRECTED_VECTORS: &[Vector] = &[
    Vector::new(AluOp::Add, 5, 7, 12),
    Vector::new(AluOp::Add, 0xFFFF_FFFF, 1, 0),
    Vector::new(AluOp::Sub, 10, 3, 7),
    Vector::new(AluOp::Sub, 0, 1, 0xFFFF_FFFF),
    Vector::new(AluOp::And, 0xF0F0_F0F0, 0xFF00_FF00, 0xF000_F000),
    Vector::new(AluOp::Or, 0xF0F0_F0F0, 0x0F0F_0F0F, 0xFFFF_FFFF),
    Vector::new(AluOp::Xor, 0xAAAA_AAAA, 0xFFFF_FFFF, 0x5555_5555),
    Vector::new(AluOp::Sll, 1, 31, 0x8000_0000),
    Vector::new(AluOp::Sll, 1, 33, 2),
    Vector::new(AluOp::Srl, 0x8000_0000, 4, 0x0800_0000),
    Vector::new(AluOp::Sra, 0x8000_0000, 4, 0xF800_0000),
    Vector::new(AluOp::Slt, 0xFFFF_FFFB, 10, 1),
    Vector::new(AluOp::Sltu, 0xFFFF_FFFB, 10, 0),
    Vector::new(AluOp::Slt, 10, 0xFFFF_FFFB, 0),
];

/// A failed check, stamped with the simulation time it was observed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Simulation time of the evaluation.
    pub time: u64,
    /// Index of the vector in the bench's table.
    pub index: usize,
    /// The applied vector.
    pub vector: Vector,
    /// What the ALU produced.
    pub actual: u32,
}

/// Self-checking ALU testbench model.
#[derive(Debug, Clone)]
pub struct AluBench {
    vectors: Vec<Vector>,
    next: usize,
    mismatches: Vec<Mismatch>,
    verbose: bool,
    finalized: bool,
}

impl AluBench {
    /// Builds the bench against `ctx`, reading `+vectors` and `+verbose`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Construction`] if `+vectors` is not a positive
    /// integer.
    pub fn new(ctx: &SimContext) -> Result<Self, SimError> {
        let count = match ctx.plusarg("vectors") {
            None => DIRECTED_VECTORS.len(),
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n.min(DIRECTED_VECTORS.len()),
                _ => {
                    return Err(SimError::Construction {
                        model: NAME.to_string(),
                        source: ModelError::InvalidArgument {
                            name: "vectors".to_string(),
                            value: raw.to_string(),
                        },
                    });
                }
            },
        };
        let mut bench = Self::with_vectors(DIRECTED_VECTORS[..count].to_vec());
        bench.verbose = ctx.test_plusarg("verbose");
        Ok(bench)
    }

    /// Builds a bench over an explicit vector table.
    pub const fn with_vectors(vectors: Vec<Vector>) -> Self {
        Self {
            vectors,
            next: 0,
            mismatches: Vec::new(),
            verbose: false,
            finalized: false,
        }
    }

    /// Number of vectors applied so far.
    pub const fn applied(&self) -> usize {
        self.next
    }

    /// Number of vectors in the table.
    pub fn total(&self) -> usize {
        self.vectors.len()
    }

    /// Checks that failed so far.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
}

impl Model for AluBench {
    fn name(&self) -> &str {
        NAME
    }

    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        let Some(&vector) = self.vectors.get(self.next) else {
            ctx.finish();
            return Ok(());
        };

        let actual = Alu::execute(vector.op, vector.a, vector.b);
        if self.verbose {
            info!(
                time = ctx.time(),
                "{} {:#010x}, {:#010x} -> {:#010x}", vector.op, vector.a, vector.b, actual
            );
        }
        if actual != vector.expected {
            warn!(
                time = ctx.time(),
                index = self.next,
                "{} {:#010x}, {:#010x}: expected {:#010x}, got {:#010x}",
                vector.op,
                vector.a,
                vector.b,
                vector.expected,
                actual
            );
            self.mismatches.push(Mismatch {
                time: ctx.time(),
                index: self.next,
                vector,
                actual,
            });
        }

        self.next += 1;
        if self.next == self.vectors.len() {
            ctx.finish();
        }
        Ok(())
    }

    fn finalize(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        if self.finalized {
            return Err(ModelError::AlreadyFinalized);
        }
        self.finalized = true;

        let failures = self.mismatches.len();
        if failures == 0 {
            info!(time = ctx.time(), checks = self.next, "alu bench passed");
            Ok(())
        } else {
            warn!(time = ctx.time(), checks = self.next, failures, "alu bench failed");
            Err(ModelError::Check {
                failures,
                total: self.next,
            })
        }
    }
}
