//! Tint transforms for Separation and DeviceN spaces
//!
//! Function evaluation belongs to the host document model, so the resolver
//! only sees two seams: [`FunctionFactory`] builds a function from the
//! descriptor's fourth element, and [`TransferFunction`] evaluates it.
//!
//! [`StandardFunctions`] covers the exponential interpolation functions
//! (FunctionType 2) that most single-ink Separation spaces use. Hosts with a
//! full function evaluator plug in their own factory.

use crate::object::{PdfObject, number_vec};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Maps `inputs()` components to `outputs()` components
pub trait TransferFunction: Send + Sync {
    fn inputs(&self) -> usize;

    fn outputs(&self) -> usize;

    fn evaluate(&self, input: &[f32]) -> Result<Vec<f32>>;
}

/// Builds transfer functions from document objects
pub trait FunctionFactory<O: PdfObject>: Send + Sync {
    fn build(&self, descriptor: &O) -> Result<Arc<dyn TransferFunction>>;
}

/// Adapter turning a closure into a [`TransferFunction`]
pub struct FnFunction<F> {
    inputs: usize,
    outputs: usize,
    f: F,
}

impl<F> FnFunction<F>
where
    F: Fn(&[f32]) -> Vec<f32> + Send + Sync,
{
    pub fn new(inputs: usize, outputs: usize, f: F) -> Self {
        Self { inputs, outputs, f }
    }
}

impl<F> TransferFunction for FnFunction<F>
where
    F: Fn(&[f32]) -> Vec<f32> + Send + Sync,
{
    fn inputs(&self) -> usize {
        self.inputs
    }

    fn outputs(&self) -> usize {
        self.outputs
    }

    fn evaluate(&self, input: &[f32]) -> Result<Vec<f32>> {
        if input.len() != self.inputs {
            return Err(Error::Function(format!(
                "expected {} inputs, got {}",
                self.inputs,
                input.len()
            )));
        }
        let out = (self.f)(input);
        if out.len() != self.outputs {
            return Err(Error::Function(format!(
                "expected {} outputs, got {}",
                self.outputs,
                out.len()
            )));
        }
        Ok(out)
    }
}

/// Exponential interpolation function (FunctionType 2)
///
/// `y_j = C0_j + x^N × (C1_j − C0_j)`, with `x` clipped to the domain and
/// `y` clipped to the range when one is given.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialFunction {
    pub domain: [f32; 2],
    pub c0: Vec<f32>,
    pub c1: Vec<f32>,
    pub exponent: f32,
    pub range: Option<Vec<[f32; 2]>>,
}

impl ExponentialFunction {
    /// Parse from a function dictionary (or stream dictionary)
    pub fn from_object<O: PdfObject>(obj: &O) -> Result<Self> {
        let domain = obj
            .get("Domain")
            .and_then(|d| number_vec(&d))
            .filter(|d| d.len() >= 2)
            .ok_or_else(|| Error::Function("Type 2 function needs a Domain".into()))?;
        let exponent = obj
            .get("N")
            .and_then(|n| n.as_real())
            .ok_or_else(|| Error::Function("Type 2 function needs N".into()))?;
        if exponent.fract() != 0.0 && domain[0].min(domain[1]) < 0.0 {
            return Err(Error::Function(format!(
                "non-integer N {} needs a Domain within x >= 0",
                exponent
            )));
        }

        let c0 = match obj.get("C0") {
            Some(c) => number_vec(&c).ok_or_else(|| Error::Function("malformed C0".into()))?,
            None => vec![0.0],
        };
        let c1 = match obj.get("C1") {
            Some(c) => number_vec(&c).ok_or_else(|| Error::Function("malformed C1".into()))?,
            None => vec![1.0],
        };
        if c0.len() != c1.len() || c0.is_empty() {
            return Err(Error::Function(format!(
                "C0 has {} entries but C1 has {}",
                c0.len(),
                c1.len()
            )));
        }

        let range = match obj.get("Range") {
            Some(r) => {
                let values =
                    number_vec(&r).ok_or_else(|| Error::Function("malformed Range".into()))?;
                if values.len() != 2 * c0.len() {
                    return Err(Error::Function("Range does not match output count".into()));
                }
                Some(
                    values
                        .chunks_exact(2)
                        .map(|pair| [pair[0] as f32, pair[1] as f32])
                        .collect(),
                )
            }
            None => None,
        };

        Ok(Self {
            domain: [domain[0] as f32, domain[1] as f32],
            c0: c0.into_iter().map(|v| v as f32).collect(),
            c1: c1.into_iter().map(|v| v as f32).collect(),
            exponent: exponent as f32,
            range,
        })
    }
}

impl TransferFunction for ExponentialFunction {
    fn inputs(&self) -> usize {
        1
    }

    fn outputs(&self) -> usize {
        self.c0.len()
    }

    fn evaluate(&self, input: &[f32]) -> Result<Vec<f32>> {
        let [x] = input else {
            return Err(Error::Function(format!(
                "Type 2 function takes 1 input, got {}",
                input.len()
            )));
        };
        let x = x.clamp(self.domain[0].min(self.domain[1]), self.domain[1].max(self.domain[0]));
        let t = x.powf(self.exponent);

        let mut out: Vec<f32> = self
            .c0
            .iter()
            .zip(&self.c1)
            .map(|(c0, c1)| c0 + t * (c1 - c0))
            .collect();
        if let Some(range) = &self.range {
            for (v, [lo, hi]) in out.iter_mut().zip(range) {
                *v = v.clamp(*lo, *hi);
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for dyn TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransferFunction({} -> {})", self.inputs(), self.outputs())
    }
}

/// Default factory: exponential interpolation functions only
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFunctions;

impl<O: PdfObject> FunctionFactory<O> for StandardFunctions {
    fn build(&self, descriptor: &O) -> Result<Arc<dyn TransferFunction>> {
        let function_type = descriptor
            .get("FunctionType")
            .and_then(|t| t.as_int())
            .ok_or_else(|| {
                Error::Function(format!(
                    "expected a function dictionary, got {}",
                    descriptor.describe()
                ))
            })?;

        match function_type {
            2 => Ok(Arc::new(ExponentialFunction::from_object(descriptor)?)),
            other => Err(Error::Function(format!(
                "unsupported FunctionType {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    fn type2(c0: &[f64], c1: &[f64], n: f64) -> Object {
        Object::dict([
            ("FunctionType", Object::int(2)),
            ("Domain", Object::reals(&[0.0, 1.0])),
            ("C0", Object::reals(c0)),
            ("C1", Object::reals(c1)),
            ("N", Object::real(n)),
        ])
    }

    #[test]
    fn test_linear_tint() {
        let f = StandardFunctions
            .build(&type2(&[0.0, 0.0, 0.0, 0.0], &[0.0, 1.0, 1.0, 0.0], 1.0))
            .unwrap();
        assert_eq!(f.inputs(), 1);
        assert_eq!(f.outputs(), 4);
        let out = f.evaluate(&[0.5]).unwrap();
        assert_eq!(out, vec![0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_domain_and_range_clipping() {
        let obj = Object::dict([
            ("FunctionType", Object::int(2)),
            ("Domain", Object::reals(&[0.0, 1.0])),
            ("C0", Object::reals(&[0.0])),
            ("C1", Object::reals(&[2.0])),
            ("Range", Object::reals(&[0.0, 1.0])),
            ("N", Object::int(1)),
        ]);
        let f = ExponentialFunction::from_object(&obj).unwrap();
        assert_eq!(f.evaluate(&[3.0]).unwrap(), vec![1.0]);
        assert_eq!(f.evaluate(&[-1.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_defaults_c0_c1() {
        let obj = Object::dict([
            ("FunctionType", Object::int(2)),
            ("Domain", Object::reals(&[0.0, 1.0])),
            ("N", Object::real(2.0)),
        ]);
        let f = ExponentialFunction::from_object(&obj).unwrap();
        let out = f.evaluate(&[0.5]).unwrap();
        assert!((out[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_fractional_exponent_needs_non_negative_domain() {
        let obj = |domain: &[f64], n: f64| {
            Object::dict([
                ("FunctionType", Object::int(2)),
                ("Domain", Object::reals(domain)),
                ("N", Object::real(n)),
            ])
        };
        let err = ExponentialFunction::from_object(&obj(&[-1.0, 1.0], 0.5)).unwrap_err();
        assert!(matches!(err, Error::Function(_)));

        assert!(ExponentialFunction::from_object(&obj(&[0.0, 1.0], 0.5)).is_ok());
        let cubic = ExponentialFunction::from_object(&obj(&[-1.0, 1.0], 3.0)).unwrap();
        assert_eq!(cubic.evaluate(&[-0.5]).unwrap(), vec![-0.125]);
    }

    #[test]
    fn test_unsupported_type() {
        let obj = Object::dict([("FunctionType", Object::int(4))]);
        let err = StandardFunctions.build(&obj).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_not_a_function() {
        let err = StandardFunctions.build(&Object::name("Identity")).unwrap_err();
        assert!(err.to_string().contains("/Identity"));
    }

    #[test]
    fn test_closure_function_checks_arity() {
        let f = FnFunction::new(2, 1, |x: &[f32]| vec![x[0] * x[1]]);
        assert_eq!(f.evaluate(&[0.5, 0.5]).unwrap(), vec![0.25]);
        assert!(f.evaluate(&[0.5]).is_err());
    }
}
