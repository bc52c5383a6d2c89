/// Convenience result type used across segue.
pub type SegueResult<T> = Result<T, SegueError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is raised while building a [`Schedule`](crate::Schedule) or loading its
/// configuration. Resolving frames against a built schedule never fails.
#[derive(thiserror::Error, Debug)]
pub enum SegueError {
    /// The timeline contains no scenes.
    #[error("empty scene list: a timeline needs at least one scene")]
    EmptySceneList,

    /// A scene duration is `<= 0` or a transition duration is `< 0`.
    #[error("invalid duration: {what} '{id}' has {frames} frames")]
    InvalidDuration {
        /// `"scene"` or `"transition"`.
        what: &'static str,
        /// Scene id, or `"<outgoing> -> <incoming>"` for transitions.
        id: String,
        /// The rejected duration.
        frames: i64,
    },

    /// A transition names a presentation that is not registered.
    #[error("unknown presentation '{0}'")]
    UnknownPresentation(String),

    /// Malformed timeline structure or presentation parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SegueError {
    /// Build a [`SegueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SegueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SegueError::UnknownPresentation`] value.
    pub fn unknown_presentation(name: impl Into<String>) -> Self {
        Self::UnknownPresentation(name.into())
    }

    /// Build a [`SegueError::InvalidDuration`] for a scene.
    pub fn invalid_scene_duration(id: impl Into<String>, frames: i64) -> Self {
        Self::InvalidDuration {
            what: "scene",
            id: id.into(),
            frames,
        }
    }

    /// Build a [`SegueError::InvalidDuration`] for a transition.
    pub fn invalid_transition_duration(
        outgoing: &str,
        incoming: &str,
        frames: i64,
    ) -> Self {
        Self::InvalidDuration {
            what: "transition",
            id: format!("{outgoing} -> {incoming}"),
            frames,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
