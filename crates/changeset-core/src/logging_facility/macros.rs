//! Canonical logging macros
//!
//! Every pipeline-level operation logs exactly one `start` and one `end` or
//! `end_error` event with the same `op` name.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use changeset_core::log_op_start;
/// log_op_start!("apply");
/// log_op_start!("apply", dry_run = true);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use changeset_core::log_op_end;
/// log_op_end!("apply", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Benign kinds (`NoPendingChanges`) are logged at `info`, everything else
/// at `error`.
///
/// # Example
///
/// ```
/// # use changeset_core::log_op_error;
/// # use changeset_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::IoFailure);
/// log_op_error!("apply", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        if ex_err.kind().is_benign() {
            tracing::info!(
                component = module_path!(),
                op = $op,
                event = $crate::logging_facility::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
            );
        } else {
            tracing::error!(
                component = module_path!(),
                op = $op,
                event = $crate::logging_facility::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
            );
        }
    }};
}
