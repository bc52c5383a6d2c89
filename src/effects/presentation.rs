use std::collections::BTreeMap;
use std::sync::Arc;

use crate::effects::builtin;
use crate::effects::style::StyleDescriptor;
use crate::foundation::core::Direction;
use crate::foundation::error::{SegueError, SegueResult};

/// A transition look: a pure mapping from `(progress, direction)` to a style.
///
/// Implementations must be deterministic (no randomness, clock or call-order dependence) and
/// must honour the symmetry contract so any two presentations compose:
///
/// | progress | direction  | result          |
/// |----------|------------|-----------------|
/// | 0        | `Entering` | fully hidden    |
/// | 1        | `Entering` | fully revealed  |
/// | 0        | `Exiting`  | fully visible   |
/// | 1        | `Exiting`  | fully hidden    |
///
/// `Steady` layers are not inside a transition; return [`StyleDescriptor::identity`].
pub trait Presentation: Send + Sync + std::fmt::Debug {
    /// Style for one layer at `progress` (which may overshoot `[0, 1]` for eased timings).
    fn style(&self, progress: f64, direction: Direction) -> StyleDescriptor;
}

/// Builds a [`Presentation`] from a transition's JSON `params`, rejecting invalid values.
pub type PresentationFactory =
    Arc<dyn Fn(&serde_json::Value) -> SegueResult<Arc<dyn Presentation>> + Send + Sync>;

/// Name-keyed table of presentation factories.
///
/// Names are matched after trimming and ASCII-lowercasing. Lookups happen while building a
/// schedule, so an unknown name fails the build rather than a frame.
#[derive(Clone)]
pub struct PresentationRegistry {
    factories: BTreeMap<String, PresentationFactory>,
}

impl PresentationRegistry {
    /// Registry with no presentations.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry preloaded with `cut`, `fade`, `slide`, `wipe`, `flip`, `clock_wipe` and `iris`.
    pub fn with_builtins() -> Self {
        let mut reg = Self::empty();
        builtin::register_all(&mut reg);
        reg
    }

    /// Register (or replace) a factory under `name`.
    pub fn register<F>(&mut self, name: impl AsRef<str>, factory: F) -> &mut Self
    where
        F: Fn(&serde_json::Value) -> SegueResult<Arc<dyn Presentation>> + Send + Sync + 'static,
    {
        self.factories
            .insert(canonical_name(name.as_ref()), Arc::new(factory));
        self
    }

    /// Register a parameterless presentation. Non-null params are rejected at build time.
    pub fn register_static<P>(&mut self, name: impl AsRef<str>, presentation: P) -> &mut Self
    where
        P: Presentation + 'static,
    {
        let name = canonical_name(name.as_ref());
        let shared: Arc<dyn Presentation> = Arc::new(presentation);
        let label = name.clone();
        self.register(name, move |params| {
            params_object(&label, params)?;
            Ok(Arc::clone(&shared))
        })
    }

    /// `true` when `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&canonical_name(name))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiate the presentation `name` with `params`.
    pub fn instantiate(
        &self,
        name: &str,
        params: &serde_json::Value,
    ) -> SegueResult<Arc<dyn Presentation>> {
        let key = canonical_name(name);
        if key.is_empty() {
            return Err(SegueError::validation("transition type must be non-empty"));
        }
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| SegueError::unknown_presentation(key.clone()))?;
        factory(params)
    }
}

impl Default for PresentationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for PresentationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub(crate) fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// `params` as an optional object; `null` means "all defaults".
pub(crate) fn params_object<'a>(
    kind: &str,
    params: &'a serde_json::Value,
) -> SegueResult<Option<&'a serde_json::Map<String, serde_json::Value>>> {
    if params.is_null() {
        return Ok(None);
    }
    params
        .as_object()
        .map(Some)
        .ok_or_else(|| SegueError::validation(format!("{kind} params must be an object")))
}

/// Edge a directional presentation moves in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Incoming content starts at the left edge.
    Left,
    /// Incoming content starts at the right edge.
    Right,
    /// Incoming content starts at the top edge.
    Top,
    /// Incoming content starts at the bottom edge.
    Bottom,
}

pub(crate) fn parse_edge(
    kind: &str,
    params: Option<&serde_json::Map<String, serde_json::Value>>,
    default: Edge,
) -> SegueResult<Edge> {
    let Some(value) = params.and_then(|p| p.get("direction")) else {
        return Ok(default);
    };
    let s = value
        .as_str()
        .ok_or_else(|| SegueError::validation(format!("{kind}.direction must be a string")))?;
    match s.trim().to_ascii_lowercase().as_str() {
        "from_left" | "left" | "left_to_right" | "lefttoright" | "ltr" => Ok(Edge::Left),
        "from_right" | "right" | "right_to_left" | "righttoleft" | "rtl" => Ok(Edge::Right),
        "from_top" | "top" | "top_to_bottom" | "toptobottom" | "ttb" => Ok(Edge::Top),
        "from_bottom" | "bottom" | "bottom_to_top" | "bottomtotop" | "btt" => Ok(Edge::Bottom),
        other => Err(SegueError::validation(format!(
            "unknown {kind}.direction '{other}'"
        ))),
    }
}

pub(crate) fn parse_positive_f64(
    kind: &str,
    key: &str,
    params: Option<&serde_json::Map<String, serde_json::Value>>,
    default: f64,
) -> SegueResult<f64> {
    let Some(value) = params.and_then(|p| p.get(key)) else {
        return Ok(default);
    };
    let v = value
        .as_f64()
        .ok_or_else(|| SegueError::validation(format!("{kind}.{key} must be a number")))?;
    if !v.is_finite() || v <= 0.0 {
        return Err(SegueError::validation(format!(
            "{kind}.{key} must be finite and > 0"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/presentation.rs"]
mod tests;
