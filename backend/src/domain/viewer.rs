//! The request context every query and mutation receives.

use super::{Error, UserId};

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    /// No authenticated session.
    #[default]
    Anonymous,
    /// A logged-in user.
    Authenticated(UserId),
}

impl Viewer {
    /// Build a viewer from an optional session user id.
    pub fn from_session(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Anonymous, Self::Authenticated)
    }

    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }

    /// Return the authenticated user id or fail with `unauthorized`.
    pub fn require(&self) -> Result<&UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn anonymous_viewer_is_rejected() {
        let err = Viewer::Anonymous.require().expect_err("anonymous");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn session_user_becomes_authenticated_viewer() {
        let id = UserId::random();
        let viewer = Viewer::from_session(Some(id.clone()));
        assert_eq!(viewer.require().expect("authenticated"), &id);
        assert_eq!(Viewer::from_session(None), Viewer::Anonymous);
    }
}
