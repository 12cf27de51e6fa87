//! Domination Engine: the dominates / duplicate primitives.

use crate::metric::{MetricRegistry, Opt};
use crate::path::Path;

/// At least as good on every metric, strictly better on one. Never self.
pub fn dominates(p: &Path, q: &Path, registry: &MetricRegistry) -> bool {
    if std::ptr::eq(p, q) {
        return false;
    }
    let mut better = 0;
    let mut worse = 0;
    for (i, decl) in registry.iter().enumerate() {
        let a = p.metrics.get(i);
        let b = q.metrics.get(i);
        match decl.opt {
            Opt::Max => {
                if a > b {
                    better += 1;
                } else if a < b {
                    worse += 1;
                }
            }
            Opt::Min => {
                if a < b {
                    better += 1;
                } else if a > b {
                    worse += 1;
                }
            }
        }
    }
    better > 0 && worse == 0
}

/// Structural equality of node sequences; metric vectors are not consulted.
pub fn duplicate(p: &Path, q: &Path) -> bool {
    p.nodes.len() == q.nodes.len() && p.nodes.iter().zip(q.nodes.iter()).all(|(a, b)| a == b)
}
