//! ---
//! exo_section: "03-logging"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Structured logging adapters for the synthesis pipeline."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
//! Context-aware wrappers around [`tracing::event!`].

/// Shared expansion used by the level-specific macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __exo_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            suit = ctx.suit.unwrap_or(""),
            from = ctx.from.unwrap_or(""),
            to = ctx.to.unwrap_or(""),
            draws = ctx.draws.unwrap_or_default(),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with suit context.
#[macro_export]
macro_rules! exo_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__exo_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__exo_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with suit context.
#[macro_export]
macro_rules! exo_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__exo_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__exo_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with suit context.
#[macro_export]
macro_rules! exo_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__exo_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__exo_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}
