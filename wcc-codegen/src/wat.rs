//! WebAssembly text instruction model
//!
//! Value types, the flat instructions the generator emits, and the tables
//! that choose an instruction for an operator or a conversion based on the
//! operand's width and signedness.

use crate::errors::CodegenError;
use std::fmt;
use wcc_common::{BasicType, Type};
use wcc_frontend::BinaryOp;

/// Bytes per WebAssembly memory page
pub const PAGE_SIZE: u32 = 65536;

/// WebAssembly value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    /// Map a language type to its machine representation. Pointers are
    /// 32-bit addresses.
    pub fn from_type(ty: &Type) -> Result<Self, CodegenError> {
        match ty {
            Type::Pointer(_) => Ok(ValueType::I32),
            Type::Basic(basic) => Self::from_basic(*basic).ok_or_else(|| CodegenError::VoidValue {
                context: "value type".to_string(),
            }),
        }
    }

    pub fn from_basic(basic: BasicType) -> Option<Self> {
        match basic {
            BasicType::I32 | BasicType::U32 => Some(ValueType::I32),
            BasicType::I64 | BasicType::U64 => Some(ValueType::I64),
            BasicType::F32 => Some(ValueType::F32),
            BasicType::F64 => Some(ValueType::F64),
            BasicType::Void => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ValueType::F32 | ValueType::F64)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::I32 => write!(f, "i32"),
            ValueType::I64 => write!(f, "i64"),
            ValueType::F32 => write!(f, "f32"),
            ValueType::F64 => write!(f, "f64"),
        }
    }
}

/// Signedness suffix on an instruction name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    None,
    Signed,
    Unsigned,
}

impl Sign {
    /// Suffix for integer instructions that distinguish signedness.
    /// Pointers count as unsigned; floats never take a suffix.
    fn of(ty: &Type) -> Self {
        match ty {
            Type::Pointer(_) => Sign::Unsigned,
            Type::Basic(basic) if basic.is_float() => Sign::None,
            Type::Basic(basic) if basic.is_signed() => Sign::Signed,
            Type::Basic(_) => Sign::Unsigned,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::None => Ok(()),
            Sign::Signed => write!(f, "_s"),
            Sign::Unsigned => write!(f, "_u"),
        }
    }
}

/// Flat (non-structured) WebAssembly instructions
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Const(ValueType, String),
    LocalGet(u32),
    LocalSet(u32),
    /// `ty.op` with an optional signedness suffix, e.g. `i32.div_s`
    Numeric { ty: ValueType, op: &'static str, sign: Sign },
    /// `to.op_from` with an optional suffix, e.g. `f64.convert_i32_u`
    Convert { to: ValueType, op: &'static str, from: ValueType, sign: Sign },
    Eqz(ValueType),
    Load(ValueType),
    Store(ValueType),
    Call(String),
    Br(u32),
    BrIf(u32),
    Drop,
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Const(ty, value) => write!(f, "{ty}.const {value}"),
            Instruction::LocalGet(slot) => write!(f, "local.get {slot}"),
            Instruction::LocalSet(slot) => write!(f, "local.set {slot}"),
            Instruction::Numeric { ty, op, sign } => write!(f, "{ty}.{op}{sign}"),
            Instruction::Convert { to, op, from, sign } => write!(f, "{to}.{op}_{from}{sign}"),
            Instruction::Eqz(ty) => write!(f, "{ty}.eqz"),
            Instruction::Load(ty) => write!(f, "{ty}.load"),
            Instruction::Store(ty) => write!(f, "{ty}.store"),
            Instruction::Call(name) => write!(f, "call ${name}"),
            Instruction::Br(depth) => write!(f, "br {depth}"),
            Instruction::BrIf(depth) => write!(f, "br_if {depth}"),
            Instruction::Drop => write!(f, "drop"),
            Instruction::Return => write!(f, "return"),
        }
    }
}

/// Pick the instruction for a binary operator applied to operands of `ty`
pub fn binary_instruction(op: BinaryOp, ty: &Type) -> Result<Instruction, CodegenError> {
    let value_type = ValueType::from_type(ty)?;
    let sign = Sign::of(ty);
    let unsupported = || CodegenError::UnsupportedOperator {
        operator: op.to_string(),
        ty: ty.clone(),
    };

    let (name, signed) = match op {
        BinaryOp::Add => ("add", false),
        BinaryOp::Sub => ("sub", false),
        BinaryOp::Mul => ("mul", false),
        BinaryOp::Div => ("div", true),
        BinaryOp::Rem => ("rem", true),
        BinaryOp::BitAnd => ("and", false),
        BinaryOp::BitOr => ("or", false),
        BinaryOp::BitXor => ("xor", false),
        BinaryOp::LeftShift => ("shl", false),
        BinaryOp::RightShift => ("shr", true),
        BinaryOp::Equal => ("eq", false),
        BinaryOp::NotEqual => ("ne", false),
        BinaryOp::Less => ("lt", true),
        BinaryOp::Greater => ("gt", true),
        BinaryOp::LessEqual => ("le", true),
        BinaryOp::GreaterEqual => ("ge", true),
        BinaryOp::Assign => return Err(unsupported()),
    };

    if value_type.is_float() && op.requires_integer() {
        return Err(unsupported());
    }

    Ok(Instruction::Numeric {
        ty: value_type,
        op: name,
        sign: if signed { sign } else { Sign::None },
    })
}

/// Instruction converting a value of type `from` into `to`, or `None` when
/// the bit pattern is reused as is
pub fn conversion_instruction(from: &Type, to: &Type) -> Result<Option<Instruction>, CodegenError> {
    let unmapped = || CodegenError::UnmappedConversion {
        from: from.clone(),
        to: to.clone(),
    };

    let (source, target) = match (from, to) {
        (Type::Pointer(_), Type::Pointer(_)) => return Ok(None),
        (Type::Pointer(_), Type::Basic(basic)) | (Type::Basic(basic), Type::Pointer(_)) => {
            return match basic {
                BasicType::I32 | BasicType::U32 => Ok(None),
                _ => Err(unmapped()),
            };
        }
        (Type::Basic(source), Type::Basic(target)) => (*source, *target),
    };

    let from_value = ValueType::from_basic(source).ok_or_else(unmapped)?;
    let to_value = ValueType::from_basic(target).ok_or_else(unmapped)?;
    if from_value == to_value {
        // same width integers only differ in how later instructions read them
        return Ok(None);
    }

    let convert = |op: &'static str, sign: Sign| Instruction::Convert {
        to: to_value,
        op,
        from: from_value,
        sign,
    };
    let instruction = match (from_value, to_value) {
        (ValueType::I32, ValueType::I64) => convert("extend", Sign::of(from)),
        (ValueType::I64, ValueType::I32) => convert("wrap", Sign::None),
        (ValueType::I32 | ValueType::I64, ValueType::F32 | ValueType::F64) => {
            convert("convert", Sign::of(from))
        }
        (ValueType::F32 | ValueType::F64, ValueType::I32 | ValueType::I64) => {
            convert("trunc", Sign::of(to))
        }
        (ValueType::F32, ValueType::F64) => convert("promote", Sign::None),
        (ValueType::F64, ValueType::F32) => convert("demote", Sign::None),
        _ => return Err(unmapped()),
    };
    Ok(Some(instruction))
}

/// Number of 64 KiB pages needed to hold `bytes`
pub fn pages_for(bytes: u32) -> u32 {
    bytes.div_ceil(PAGE_SIZE)
}
