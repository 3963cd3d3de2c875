//! Command Evaluator
//!
//! This module implements the numeric operations CalcWire serves.
//! It receives a parsed [`Command`] and dispatches on the operation name
//! and parameter count to the matching handler.
//!
//! ## Supported Operations
//!
//! - `factorial n` - product of the integers up to n (n >= 0)
//! - `fibonacci n` - iterative Fibonacci (returns 1 for n < 3)
//! - `cos x` / `sin x` / `tan x` - trigonometry, radians
//! - `sqrt x` - square root (negative input yields NaN, not an error)
//! - `pow x,y` - x raised to the power y
//! - `abs p1,p2,...` - arithmetic mean of the parameters
//!
//! `abs` really does compute the mean. The name is a long-standing
//! artifact of the service's wire protocol and clients depend on the
//! behavior, so it must not be "fixed" to an absolute value.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────┐     │
//! │  │   Command   │───>│  dispatch()  │───>│  op_*()     │     │
//! │  └─────────────┘    └──────────────┘    └─────────────┘     │
//! │                                               │             │
//! │                                               ▼             │
//! │                                     Result<f64, EvalError>  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Evaluation is pure: no I/O, no shared state, deterministic for a
//! given command.

use crate::protocol::types::Command;
use thiserror::Error;

/// Errors produced by command evaluation.
///
/// Every rejected command renders the same generic body on the wire;
/// unknown names, wrong arity, and domain violations are deliberately
/// indistinguishable to the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Unknown operation, wrong arity, or a domain violation
    #[error("Wrong parameters")]
    WrongParameters,
}

/// Evaluates commands against the operation table.
#[derive(Debug, Clone, Default)]
pub struct CommandHandler;

impl CommandHandler {
    /// Creates a new command handler.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a command and returns the numeric result.
    ///
    /// # Example
    ///
    /// ```
    /// use calcwire::commands::CommandHandler;
    /// use calcwire::protocol::types::Command;
    ///
    /// let handler = CommandHandler::new();
    /// let result = handler.execute(&Command::new("pow", vec![2.0, 10.0]));
    /// assert_eq!(result, Ok(1024.0));
    /// ```
    pub fn execute(&self, command: &Command) -> Result<f64, EvalError> {
        self.dispatch(command.name.as_str(), &command.params)
    }

    /// Dispatches on operation name and arity.
    fn dispatch(&self, name: &str, params: &[f64]) -> Result<f64, EvalError> {
        match (name, params.len()) {
            ("factorial", 1) => self.op_factorial(params[0]),
            ("fibonacci", 1) => Ok(self.op_fibonacci(params[0])),
            ("cos", 1) => Ok(params[0].cos()),
            ("sin", 1) => Ok(params[0].sin()),
            ("tan", 1) => Ok(params[0].tan()),
            ("sqrt", 1) => Ok(params[0].sqrt()),
            ("pow", 2) => Ok(params[0].powf(params[1])),
            ("abs", n) if n > 0 => Ok(self.op_mean(params)),
            _ => Err(EvalError::WrongParameters),
        }
    }

    /// factorial n: product of the integers i while i <= n.
    ///
    /// The loop counter is compared against the untruncated argument, so
    /// `factorial 5.5` multiplies 1 through 5. Negative input is the one
    /// domain violation the table rejects. Counter and product are both
    /// f64: large inputs saturate to infinity instead of overflowing.
    fn op_factorial(&self, n: f64) -> Result<f64, EvalError> {
        if n < 0.0 {
            return Err(EvalError::WrongParameters);
        }

        let mut answer = 1.0;
        let mut i = 1.0;
        while i <= n {
            answer *= i;
            i += 1.0;
        }
        Ok(answer)
    }

    /// fibonacci n: iterative recurrence from the pair (0, 1).
    ///
    /// Returns 1 for n < 3. The counter is compared against the
    /// untruncated argument, which pins down the values at fractional
    /// and small-boundary inputs: `fibonacci 3` runs one step and
    /// returns 1, `fibonacci 10` returns 34. The recurrence accumulates
    /// in f64 so large inputs lose precision gracefully rather than
    /// overflowing an integer.
    fn op_fibonacci(&self, n: f64) -> f64 {
        if n < 3.0 {
            return 1.0;
        }

        let mut prev1 = 0.0;
        let mut prev2 = 1.0;
        let mut next = prev1 + prev2;

        let mut i = 2.0;
        while i < n {
            next = prev1 + prev2;
            prev1 = prev2;
            prev2 = next;
            i += 1.0;
        }
        next
    }

    /// abs p1,...,pn: the arithmetic mean of the parameters.
    fn op_mean(&self, params: &[f64]) -> f64 {
        let sum: f64 = params.iter().sum();
        sum / params.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(name: &str, params: Vec<f64>) -> Result<f64, EvalError> {
        CommandHandler::new().execute(&Command::new(name, params))
    }

    #[test]
    fn test_factorial_exact_through_20() {
        let mut expected = 1.0;
        assert_eq!(eval("factorial", vec![0.0]), Ok(1.0));
        for n in 1..=20 {
            expected *= n as f64;
            assert_eq!(eval("factorial", vec![n as f64]), Ok(expected));
        }
    }

    #[test]
    fn test_factorial_truncates_fractional_input() {
        assert_eq!(eval("factorial", vec![5.5]), Ok(120.0));
    }

    #[test]
    fn test_factorial_rejects_negative() {
        assert_eq!(eval("factorial", vec![-1.0]), Err(EvalError::WrongParameters));
        assert_eq!(eval("factorial", vec![-0.5]), Err(EvalError::WrongParameters));
    }

    #[test]
    fn test_fibonacci_small_inputs_return_one() {
        for n in [-5.0, 0.0, 1.0, 2.0, 2.9] {
            assert_eq!(eval("fibonacci", vec![n]), Ok(1.0), "fibonacci {n}");
        }
    }

    #[test]
    fn test_fibonacci_boundary_and_sequence() {
        // One loop step at n = 3, then 1, 2, 3, 5, 8, 13, 21, 34.
        assert_eq!(eval("fibonacci", vec![3.0]), Ok(1.0));
        assert_eq!(eval("fibonacci", vec![4.0]), Ok(2.0));
        assert_eq!(eval("fibonacci", vec![5.0]), Ok(3.0));
        assert_eq!(eval("fibonacci", vec![10.0]), Ok(34.0));
    }

    #[test]
    fn test_fibonacci_large_input_does_not_overflow() {
        // Beyond fibonacci 92 the values exceed i64; the f64 recurrence
        // must keep producing finite results instead of panicking.
        let result = eval("fibonacci", vec![100.0]).unwrap();
        assert!(result.is_finite());
        // fib(100) = 354224848179261915075, within f64 rounding.
        assert!((result - 3.54224848179262e20).abs() / result < 1e-12);

        let small = eval("fibonacci", vec![93.0]).unwrap();
        assert!(small.is_finite() && small > 0.0);
    }

    #[test]
    fn test_factorial_large_input_saturates_to_infinity() {
        // factorial 170 is the largest finite f64 factorial; 171
        // saturates to infinity rather than failing or panicking.
        let finite = eval("factorial", vec![170.0]).unwrap();
        assert!(finite.is_finite());
        assert_eq!(eval("factorial", vec![171.0]), Ok(f64::INFINITY));
    }

    #[test]
    fn test_fibonacci_fractional_bound() {
        // 3.5 admits counter values 2 and 3: two iterations.
        assert_eq!(eval("fibonacci", vec![3.5]), Ok(2.0));
    }

    #[test]
    fn test_trigonometry() {
        assert_eq!(eval("cos", vec![0.0]), Ok(1.0));
        assert_eq!(eval("sin", vec![0.0]), Ok(0.0));
        assert_eq!(eval("tan", vec![0.0]), Ok(0.0));
        let sin = eval("sin", vec![std::f64::consts::FRAC_PI_2]).unwrap();
        assert!((sin - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(eval("sqrt", vec![16.0]), Ok(4.0));
        // Negative input is NaN, not an evaluation failure.
        assert!(eval("sqrt", vec![-1.0]).unwrap().is_nan());
    }

    #[test]
    fn test_pow() {
        assert_eq!(eval("pow", vec![2.0, 10.0]), Ok(1024.0));
        assert_eq!(eval("pow", vec![9.0, 0.5]), Ok(3.0));
    }

    #[test]
    fn test_abs_is_the_mean() {
        let params = vec![5.0, 87.0, 2.0, 5.0, 1.0, 4.0, 67.0, 6.0];
        assert_eq!(eval("abs", params), Ok(22.125));
        assert_eq!(eval("abs", vec![-3.0]), Ok(-3.0));
    }

    #[test]
    fn test_abs_rejects_empty_parameters() {
        assert_eq!(eval("abs", vec![]), Err(EvalError::WrongParameters));
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(eval("modulo", vec![5.0, 2.0]), Err(EvalError::WrongParameters));
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(eval("factorial", vec![1.0, 2.0]), Err(EvalError::WrongParameters));
        assert_eq!(eval("pow", vec![2.0]), Err(EvalError::WrongParameters));
        assert_eq!(eval("sqrt", vec![]), Err(EvalError::WrongParameters));
    }

    #[test]
    fn test_operation_names_are_case_sensitive() {
        assert_eq!(eval("Factorial", vec![5.0]), Err(EvalError::WrongParameters));
    }
}
