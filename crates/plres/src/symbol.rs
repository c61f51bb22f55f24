use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU32, Ordering},
        Mutex,
    },
};

use crate::{in_session, with_session_globals};

/// Source of interner ids; every session gets a new one.
static NEXT_SESSION: AtomicU32 = AtomicU32::new(0);

/// An interned proposition symbol.
///
/// A symbol remembers the session whose interner created it. Two symbols are
/// equal iff they come from the same session and have the same spelling, so
/// symbols from different sessions never compare equal. Reading the spelling
/// of a symbol anywhere but inside its own session panics.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    session: u32,
    index: u32,
}

impl Symbol {
    /// Maps a string to its interned representation.
    pub fn intern(string: &str) -> Self {
        with_session_globals(|session_globals| session_globals.symbol_interner.intern(string))
    }

    /// Calls `f` with the spelling of `self`.
    ///
    /// The string is borrowed from the session's interner and only valid
    /// while `f` runs.
    ///
    /// # Panics
    ///
    /// Outside a session, or inside a session other than the one `self` was
    /// interned in.
    pub fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        with_session_globals(|session_globals| {
            match session_globals.symbol_interner.get(self) {
                Some(s) => f(s),
                None => panic!(
                    "symbol #{} of session {} used in session {}",
                    self.index,
                    self.session,
                    session_globals.symbol_interner.session
                ),
            }
        })
    }

    /// Whether the current session can resolve this symbol.
    pub fn is_live(self) -> bool {
        in_session() && with_session_globals(|g| g.symbol_interner.get(self).is_some())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_live() {
            self.with_str(|s| fmt::Debug::fmt(s, f))
        } else {
            write!(f, "Symbol({}#{})", self.session, self.index)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

/// Spellings of one session. Each spelling is boxed once and never dropped
/// before the interner, so `names` can borrow from `strings`.
pub(crate) struct Interner {
    session: u32,
    inner: Mutex<InternerInner>,
}

#[derive(Default)]
struct InternerInner {
    names: HashMap<&'static str, Symbol>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn fresh() -> Self {
        Interner {
            session: NEXT_SESSION.fetch_add(1, Ordering::Relaxed),
            inner: Mutex::default(),
        }
    }

    fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.inner.lock().unwrap();
        if let Some(&name) = inner.names.get(string) {
            return name;
        }

        let name = Symbol {
            session: self.session,
            index: inner.strings.len() as u32,
        };
        let owned: Box<str> = string.into();

        // SAFETY: the boxed string's heap allocation never moves, even when
        // `strings` reallocates, and it is only freed together with `names`.
        let key: &'static str = unsafe { &*(&*owned as *const str) };
        inner.strings.push(owned);
        inner.names.insert(key, name);
        name
    }

    /// `None` unless `symbol` was handed out by this interner.
    fn get(&self, symbol: Symbol) -> Option<&str> {
        if symbol.session != self.session {
            return None;
        }
        let inner = self.inner.lock().unwrap();
        let s: *const str = &**inner.strings.get(symbol.index as usize)?;
        // SAFETY: boxes are append-only and live as long as `self`, so the
        // pointee outlives the returned borrow of `self`.
        Some(unsafe { &*s })
    }
}

mod serde {
    use super::Symbol;
    use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Symbol {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.with_str(|s| serializer.serialize_str(s))
        }
    }

    /// Interns into the current session.
    impl<'de> Deserialize<'de> for Symbol {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let spelling = String::deserialize(deserializer)?;
            Ok(Symbol::intern(&spelling))
        }
    }
}
