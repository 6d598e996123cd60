//! Sign-in and workspace selection, as the login and chatbot-picker pages
//! drive them.

use std::sync::Arc;

use url::form_urlencoded;

use dash_domain::config::RoutesConfig;
use dash_domain::error::{Error, Result};
use dash_domain::{Chatbot, Navigator};
use dash_navigation::{RouteKey, Router};
use dash_sessions::{SessionStore, WorkspaceSelectionStore};

use crate::api::{Credentials, DashboardApi};
use crate::state::AppContext;

pub struct LoginFlow {
    api: Arc<dyn DashboardApi>,
    session: Arc<SessionStore>,
    workspace: Arc<WorkspaceSelectionStore>,
    router: Arc<Router>,
    routes: RoutesConfig,
}

impl LoginFlow {
    pub fn new(api: Arc<dyn DashboardApi>, ctx: &AppContext) -> Self {
        Self {
            api,
            session: ctx.session.clone(),
            workspace: ctx.workspace.clone(),
            router: ctx.router.clone(),
            routes: ctx.config.routes.clone(),
        }
    }

    /// Authenticate, record the session, and navigate to where the visitor
    /// was headed.
    ///
    /// `callback` overrides the callback parameter of the current location.
    /// Targets that are not same-origin paths fall back to the landing page.
    /// Returns the location navigated to.
    pub async fn sign_in(&self, credentials: &Credentials, callback: Option<&str>) -> Result<String> {
        let (user, account) = self.api.authenticate(credentials).await?;
        self.session.login(user, account)?;

        let requested = match callback {
            Some(c) => Some(c.to_owned()),
            None => callback_from_location(&self.router.location(), &self.routes.callback_param),
        };
        let target = requested
            .as_deref()
            .and_then(|c| safe_callback(&self.routes, c))
            .unwrap_or(self.routes.landing_path.as_str())
            .to_owned();

        self.router.push(&target);
        Ok(target)
    }

    /// Chatbots owned by the signed-in account.
    pub async fn chatbots(&self) -> Result<Vec<Chatbot>> {
        let account = self
            .session
            .snapshot()
            .account
            .ok_or_else(|| Error::MissingIdentity("no signed-in account".into()))?;
        self.api.list_chatbots(&account).await
    }

    /// Make the chatbot with `id` the active workspace.
    pub async fn choose_chatbot(&self, id: &str) -> Result<Chatbot> {
        let chatbot = self
            .chatbots()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("chatbot `{id}`")))?;

        self.workspace.select_chatbot(Some(chatbot.clone()))?;
        Ok(chatbot)
    }
}

/// The decoded callback parameter of `location`, if present.
pub fn callback_from_location(location: &str, param: &str) -> Option<String> {
    let query = location.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())
}

/// `callback` if it is a safe post-login target: an absolute same-origin
/// path that does not lead back to the login page.
pub fn safe_callback<'a>(routes: &RoutesConfig, callback: &'a str) -> Option<&'a str> {
    let same_origin = callback.starts_with('/')
        && !callback.starts_with("//")
        && !callback.contains('\\');
    if !same_origin {
        return None;
    }
    if RouteKey::from_location(callback) == RouteKey::from_location(&routes.login_path) {
        return None;
    }
    Some(callback)
}
