//! Credential storage and the process-wide session
//!
//! The console keeps exactly one credential token. It lives in a single named
//! slot (a [`TokenStore`]) and is mirrored in memory by [`Session`], which is
//! created once at startup and shared by the API client and the route guard.
//! The token only changes through [`Session::login`] and [`Session::logout`].

use crate::error::ClientResult;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Opaque bearer credential issued by the remote API
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for the `Authorization` header and the store
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Authentication state derived from token presence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A token is held
    Authenticated,
    /// No token is held
    Anonymous,
}

/// Persistent slot holding at most one token
pub trait TokenStore: Send + Sync {
    /// Read the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn save(&self, token: &str) -> io::Result<()>;

    /// Remove the stored token; removing an empty slot succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be removed.
    fn clear(&self) -> io::Result<()>;
}

/// Token slot backed by a single file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Use `path` as the token slot
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the slot
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-process token slot that forgets everything on exit
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.slot.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn load(&self) -> io::Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        (**self).save(token)
    }

    fn clear(&self) -> io::Result<()> {
        (**self).clear()
    }
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<Token>>,
}

/// Process-wide session shared by every consumer of the token
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Initialize the session from the persisted slot
    ///
    /// An unreadable slot is logged and treated as an absent token.
    pub fn restore(store: impl TokenStore + 'static) -> Self {
        let token = match store.load() {
            Ok(Some(raw)) => {
                info!("Restored stored credential");
                Some(Token::new(raw))
            }
            Ok(None) => {
                debug!("No stored credential, starting anonymous");
                None
            }
            Err(e) => {
                warn!("Credential storage unreadable, starting anonymous: {}", e);
                None
            }
        };

        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                token: RwLock::new(token),
            }),
        }
    }

    /// Anonymous session over an in-memory slot
    #[must_use]
    pub fn in_memory() -> Self {
        Self::restore(MemoryTokenStore::new())
    }

    /// Current token, if any
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.inner.token.read().clone()
    }

    /// Authentication state at this instant
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.inner.token.read().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Whether a token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Persist `token` and make it visible to every consumer
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written; the in-memory session
    /// is left unchanged in that case.
    pub fn login(&self, token: Token) -> ClientResult<()> {
        self.inner.store.save(token.expose())?;
        *self.inner.token.write() = Some(token);
        info!("Session established");
        Ok(())
    }

    /// Forget the token in memory and in the slot
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be cleared. The in-memory token is
    /// dropped first, so the session is anonymous either way.
    pub fn logout(&self) -> ClientResult<()> {
        *self.inner.token.write() = None;
        self.inner.store.clear()?;
        info!("Session cleared");
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
