//! Token-gated, read-only access to the catalog.
//!
//! This is a separate entry point from [`crate::controller`]: it lists
//! automations for a signed-in user and cannot run them. A `401` from the
//! server clears the stored credentials and sends the user to the login page.

use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::AutomationApi;
use crate::error::{Error, Result};
use crate::view::CatalogListView;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl Display for UserProfile {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.full_name, &self.email) {
            (Some(full_name), Some(email)) if !full_name.is_empty() => {
                write!(formatter, "{full_name} <{email}>")
            }
            (Some(full_name), _) if !full_name.is_empty() => formatter.write_str(full_name),
            (_, Some(email)) if self.username.is_empty() => formatter.write_str(email),
            _ => formatter.write_str(&self.username),
        }
    }
}

/// What is persisted between invocations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
}

pub trait CredentialStore {
    /// # Errors
    ///
    /// Returns an error if stored credentials exist but cannot be read.
    fn load_token(&self) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the stored credentials cannot be removed.
    fn clear(&mut self) -> Result<()>;
}

/// Credentials kept in a YAML file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: String,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Writes a token, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialized.
    pub fn save_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io_error("credentials".to_string(), self.path.clone(), e)
            })?;
        }

        let f = File::create(&self.path)
            .map_err(|e| Error::io_error("credentials".to_string(), self.path.clone(), e))?;

        serde_yaml::to_writer(
            f,
            &Credentials {
                access_token: token.to_string(),
            },
        )
        .map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                "credentials".to_string(),
                self.path.clone(),
                e,
            )
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn load_token(&self) -> Result<Option<String>> {
        if !Path::new(&self.path).exists() {
            return Ok(None);
        }

        let reader = File::open(&self.path)
            .map_err(|e| Error::io_error("credentials".to_string(), self.path.clone(), e))?;

        let credentials: Credentials = serde_yaml::from_reader(reader).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "credentials".to_string(),
                self.path.clone(),
                e,
            )
        })?;

        Ok(Some(credentials.access_token).filter(|token| !token.is_empty()))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_error(
                "credentials".to_string(),
                self.path.clone(),
                e,
            )),
        }
    }
}

/// How a read-only listing ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAccess {
    Listed(usize),
    LoginRequired,
    Failed,
}

/// Shows the catalog as a read-only list for the stored credentials.
///
/// `connect` builds an API client carrying the token. Without a token, or when
/// the server rejects it, the view is sent to `login_url`; a rejected token is
/// also removed from the store.
///
/// # Errors
///
/// Returns an error only if the credential store itself fails.
pub fn show_read_only_catalog<C, A, V>(
    store: &mut C,
    connect: impl FnOnce(&str) -> A,
    login_url: &str,
    view: &mut V,
) -> Result<CatalogAccess>
where
    C: CredentialStore,
    A: AutomationApi,
    V: CatalogListView,
{
    let Some(token) = store.load_token()? else {
        info!("No stored credentials, redirecting to login");
        view.redirect_to_login(login_url);
        return Ok(CatalogAccess::LoginRequired);
    };

    let api = connect(&token);

    match api.list_automations() {
        Ok(automations) => {
            match api.current_user() {
                Ok(Some(profile)) => view.render_signed_in_user(&profile),
                Ok(None) => {}
                Err(Error::SessionExpired) => return expire_session(store, login_url, view),
                Err(e) => warn!("Could not look up the signed-in user: {e}"),
            }

            view.render_catalog_list(&automations);
            Ok(CatalogAccess::Listed(automations.len()))
        }
        Err(Error::SessionExpired) => expire_session(store, login_url, view),
        Err(e) => {
            warn!("Failed to load automations: {e}");
            view.show_error(&format!("Failed to load automations: {e}"));
            Ok(CatalogAccess::Failed)
        }
    }
}

fn expire_session<C: CredentialStore, V: CatalogListView>(
    store: &mut C,
    login_url: &str,
    view: &mut V,
) -> Result<CatalogAccess> {
    info!("Session expired, clearing stored credentials");
    store.clear()?;
    view.redirect_to_login(login_url);
    Ok(CatalogAccess::LoginRequired)
}
