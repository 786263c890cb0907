// Error handling macros
// Shorthand for raising, locating and logging structured errors

/// Return early with a structured error, raising it first
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::StructuredError::raise($err).into())
    };
}

/// Return early with a structured error if a condition is not satisfied
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            $crate::bail!($err);
        }
    };
}

/// Stamp an error with the calling module as context and the current line
#[macro_export]
macro_rules! locate {
    ($err:expr) => {
        $crate::StructuredError::with_line(
            $crate::StructuredError::with_context($err, module_path!()),
            line!().to_string(),
        )
    };
    ($err:expr, $member:expr) => {
        $crate::StructuredError::with_line(
            $crate::StructuredError::with_member(
                $crate::StructuredError::with_context($err, module_path!()),
                $member,
            ),
            line!().to_string(),
        )
    };
}

/// Report the error of a `Result` and continue the enclosing loop.
///
/// The error is lifted with [`to_structured`](crate::to_structured), so any
/// [`IntoStructured`](crate::IntoStructured) type works, and logged through
/// [`StructuredError::report`](crate::StructuredError::report).
#[macro_export]
macro_rules! log_error {
    ($result:expr) => {
        match $result {
            Ok(val) => val,
            Err(err) => {
                $crate::to_structured(err).report();
                continue;
            }
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(val) => val,
            Err(err) => {
                $crate::to_structured(err).report_with($message);
                continue;
            }
        }
    };
}

/// Turn a `Result` into an `Option`, reporting the error as [`log_error!`] does.
#[macro_export]
macro_rules! result_to_option {
    ($result:expr) => {
        match $result {
            Ok(val) => Some(val),
            Err(err) => {
                $crate::to_structured(err).report();
                None
            }
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(val) => Some(val),
            Err(err) => {
                $crate::to_structured(err).report_with($message);
                None
            }
        }
    };
}
