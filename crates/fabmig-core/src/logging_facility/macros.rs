//! Operation boundary macros
//!
//! Every boundary event carries `component`, `op` and `event`; end events add
//! `duration_ms`, failures add `err.kind`/`err.code`. Extra `key = value`
//! fields are forwarded to `tracing` unchanged.
//!
//! Callers must depend on `tracing` and `fabmig-core-types`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Category or run is about to be processed
///
/// ```
/// # use fabmig_core::log_op_start;
/// log_op_start!("fetch_category", category = "datasets");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            fabmig_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Successful end; `duration_ms` is mandatory
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            fabmig_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Failed end of an operation at `error` level
///
/// `$err` is converted into `ExError` so that its stable code is logged.
///
/// ```
/// # use fabmig_core::log_op_error;
/// use fabmig_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Authentication).with_message("token rejected");
/// log_op_error!("open_session", err, duration_ms = 10, side = "target");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            fabmig_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = ex_err.message()
            $(, $($field)*)?
        )
    }};
}
