//! Gradient identity and definitions.
//!
//! Gradient fills are referenced by id inside one rendering surface, so two
//! charts on the same page must never share an id. Each mounted chart owns a
//! [`GradientRegistry`] whose namespace comes from a process-wide counter;
//! ids are allocated once per data key and reused on every later render.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use vizkit_core::ChartDefaults;

use crate::plan::{GradientDef, GradientStop};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Per-instance gradient id table
#[derive(Debug, Clone)]
pub struct GradientRegistry {
    namespace: String,
    ids: HashMap<String, String>,
}

impl GradientRegistry {
    /// Allocate a fresh namespace; call once per mounted chart
    pub fn mount(prefix: &str) -> Self {
        let token = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let namespace = format!("{}-{}", prefix, token);
        tracing::debug!(namespace = %namespace, "Mounted gradient registry");
        Self::with_namespace(namespace)
    }

    /// Registry with a caller-chosen namespace (snapshot tests)
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ids: HashMap::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Id for `data_key`, allocated on first request
    pub fn id_for(&mut self, data_key: &str) -> String {
        if let Some(id) = self.ids.get(data_key) {
            return id.clone();
        }
        let id = format!("{}-grad-{}", self.namespace, self.ids.len());
        tracing::trace!(data_key, id = %id, "Allocated gradient id");
        self.ids.insert(data_key.to_string(), id.clone());
        id
    }

    /// Number of ids allocated so far
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Vertical fade from `color` near the data line to transparent at the far edge
pub fn gradient_def(id: impl Into<String>, color: &str, defaults: &ChartDefaults) -> GradientDef {
    let (near, far) = defaults.gradient_stops;
    GradientDef {
        id: id.into(),
        vector: (0.0, 0.0, 0.0, 1.0),
        stops: vec![
            GradientStop {
                offset: near,
                color: color.to_string(),
                opacity: defaults.gradient_near_opacity,
            },
            GradientStop {
                offset: far,
                color: color.to_string(),
                opacity: defaults.gradient_far_opacity,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_stable_within_instance() {
        let mut reg = GradientRegistry::mount("area");
        let a1 = reg.id_for("revenue");
        let b1 = reg.id_for("cost");
        let a2 = reg.id_for("revenue");
        assert_eq!(a1, a2);
        assert_ne!(a1, b1);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_remount_gets_fresh_namespace() {
        let mut first = GradientRegistry::mount("area");
        let mut second = GradientRegistry::mount("area");
        assert_ne!(first.namespace(), second.namespace());
        assert_ne!(first.id_for("revenue"), second.id_for("revenue"));
    }

    #[test]
    fn test_fixed_namespace_ids() {
        let mut reg = GradientRegistry::with_namespace("snap");
        assert_eq!(reg.id_for("a"), "snap-grad-0");
        assert_eq!(reg.id_for("b"), "snap-grad-1");
    }

    #[test]
    fn test_gradient_fades() {
        let def = gradient_def("g", "#3b82f6", &ChartDefaults::default());
        assert_eq!(def.stops.len(), 2);
        assert_eq!(def.stops[0].offset, 0.05);
        assert_eq!(def.stops[1].offset, 0.95);
        assert!(def.stops[0].opacity > def.stops[1].opacity);
        assert!(def.stops[1].opacity <= 0.05);
    }
}
