pub mod calculi;
pub mod clause;
pub mod parse;
pub mod report;
mod symbol;

pub use calculi::resolution::prop::{resolution, resolution_with, resolve};
pub use calculi::resolution::{Entailment, Params, ResErr};
pub use clause::{Clause, KnowledgeBase, Literal};
pub use symbol::Symbol;

use symbol::Interner;

/// Per-thread state shared by everything created inside one [`session`].
pub(crate) struct SessionGlobals {
    symbol_interner: Interner,
}

impl SessionGlobals {
    fn new() -> Self {
        Self {
            symbol_interner: Interner::fresh(),
        }
    }
}

scoped_tls::scoped_thread_local!(static SESSION_GLOBALS: SessionGlobals);

/// Runs `f` with a fresh symbol interner.
///
/// Symbols (and therefore literals and clauses) belong to the session they
/// were created in. They never equal values from another session, and
/// printing them outside their session panics. Convert results to owned text,
/// e.g. a [`report::Report`], before returning them from `f`.
pub fn session<R>(f: impl FnOnce() -> R) -> R {
    let globals = SessionGlobals::new();
    SESSION_GLOBALS.set(&globals, f)
}

#[inline]
pub(crate) fn with_session_globals<R, F>(f: F) -> R
where
    F: FnOnce(&SessionGlobals) -> R,
{
    SESSION_GLOBALS.with(f)
}

/// Whether the current thread is inside a [`session`].
pub fn in_session() -> bool {
    SESSION_GLOBALS.is_set()
}
