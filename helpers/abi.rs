//! Dynamic ABI encoding for constructor arguments and state reads.

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt, Specifier},
    json_abi::{Function, JsonAbi, Param},
    primitives::{hex, Bytes},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("expected {expected} arguments, got {got}")]
    ArgumentCount { expected: usize, got: usize },
    #[error("no function {name} taking {arity} arguments")]
    UnknownFunction { name: String, arity: usize },
    #[error("argument {index} ({ty}): {source}")]
    Argument {
        index: usize,
        ty: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
    #[error(transparent)]
    Codec(#[from] alloy::dyn_abi::Error),
}

fn coerce_args(params: &[Param], args: &[String]) -> Result<Vec<DynSolValue>, AbiError> {
    if params.len() != args.len() {
        return Err(AbiError::ArgumentCount {
            expected: params.len(),
            got: args.len(),
        });
    }
    params
        .iter()
        .zip(args)
        .enumerate()
        .map(|(index, (param, raw))| {
            param
                .resolve()
                .and_then(|ty| ty.coerce_str(raw))
                .map_err(|source| AbiError::Argument {
                    index,
                    ty: param.ty.clone(),
                    source,
                })
        })
        .collect()
}

/// Appends the ABI-encoded constructor arguments to the creation bytecode.
pub(crate) fn encode_constructor(
    abi: &JsonAbi,
    bytecode: &Bytes,
    args: &[String],
) -> Result<Bytes, AbiError> {
    let mut code = bytecode.to_vec();
    match &abi.constructor {
        Some(constructor) => {
            let values = coerce_args(&constructor.inputs, args)?;
            code.extend(constructor.abi_encode_input(&values)?);
        }
        None if !args.is_empty() => {
            return Err(AbiError::ArgumentCount {
                expected: 0,
                got: args.len(),
            });
        }
        None => {}
    }
    Ok(code.into())
}

/// Picks the overload of `name` matching the argument count and encodes the call.
pub(crate) fn encode_call<'a>(
    abi: &'a JsonAbi,
    name: &str,
    args: &[String],
) -> Result<(&'a Function, Bytes), AbiError> {
    let function = abi
        .function(name)
        .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == args.len()))
        .ok_or_else(|| AbiError::UnknownFunction {
            name: name.to_string(),
            arity: args.len(),
        })?;
    let values = coerce_args(&function.inputs, args)?;
    let calldata = function.abi_encode_input(&values)?;
    Ok((function, calldata.into()))
}

pub(crate) fn decode_output(function: &Function, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
    Ok(function.abi_decode_output(data)?)
}

/// Renders a decoded value for console output.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            format!("[{}]", format_values(items))
        }
        DynSolValue::Tuple(items) => format!("({})", format_values(items)),
        other => format!("{other:?}"),
    }
}

pub fn format_values(values: &[DynSolValue]) -> String {
    values.iter().map(format_value).collect::<Vec<_>>().join(", ")
}
