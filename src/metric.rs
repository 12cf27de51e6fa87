//! Metric Registry and Metric Vector: the combination algebra.

/// Direction in which a metric is considered "better".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opt {
    Min,
    Max,
}

/// How two segment values combine along a concatenated path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combo {
    Add,
    Min,
    Max,
}

#[derive(Clone, Debug)]
pub struct MetricDecl {
    pub name: String,
    pub opt: Opt,
    pub combo: Combo,
    pub arg: f64,
}

/// Declaration order is iteration order everywhere else.
#[derive(Clone, Debug, Default)]
pub struct MetricRegistry {
    decls: Vec<MetricDecl>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self { decls: Vec::new() }
    }

    /// First declaration wins; a duplicate name just logs a warning.
    pub fn declare(&mut self, name: impl Into<String>, opt: Opt, combo: Combo, arg: f64) -> bool {
        let name = name.into();
        if self.index_of(&name).is_some() {
            log::warn!("Metric \"{}\" already declared, ignoring duplicate", name);
            return false;
        }
        self.decls.push(MetricDecl { name, opt, combo, arg });
        true
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.decls.iter().position(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDecl> {
        self.decls.iter()
    }

    pub fn get(&self, idx: usize) -> &MetricDecl {
        &self.decls[idx]
    }
}

/// Values addressed positionally, aligned to the owning registry's order.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricVector(Vec<f64>);

impl MetricVector {
    pub const MISSING: f64 = -1.0;

    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.0.get(idx).copied().unwrap_or(Self::MISSING)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Pure: mutates neither operand.
    pub fn combine(&self, other: &MetricVector, registry: &MetricRegistry) -> MetricVector {
        let mut out = Vec::with_capacity(registry.len());
        for (i, decl) in registry.iter().enumerate() {
            let a = self.get(i);
            let b = other.get(i);
            let c = match decl.combo {
                Combo::Add => a + b + decl.arg,
                Combo::Min => a.min(b),
                Combo::Max => a.max(b),
            };
            out.push(c);
        }
        MetricVector(out)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_cost_add() -> MetricRegistry {
        let mut r = MetricRegistry::new();
        r.declare("cost", Opt::Min, Combo::Add, 0.0);
        r
    }

    #[test]
    fn duplicate_metric_name_is_rejected() {
        let mut r = registry_cost_add();
        assert!(!r.declare("cost", Opt::Max, Combo::Min, 1.0));
        assert_eq!(r.len(), 1);
        assert_eq!(r.get(0).opt, Opt::Min);
    }

    #[test]
    fn combine_add_sums_with_bias() {
        let mut r = MetricRegistry::new();
        r.declare("hops", Opt::Min, Combo::Add, 1.0);
        let a = MetricVector::from_values(vec![0.0]);
        let b = MetricVector::from_values(vec![0.0]);
        let c = a.combine(&b, &r);
        assert_eq!(c.get(0), 1.0);
    }

    #[test]
    fn combine_min_max() {
        let mut r = MetricRegistry::new();
        r.declare("bw", Opt::Max, Combo::Min, 0.0);
        let a = MetricVector::from_values(vec![10.0]);
        let b = MetricVector::from_values(vec![5.0]);
        assert_eq!(a.combine(&b, &r).get(0), 5.0);

        let mut r2 = MetricRegistry::new();
        r2.declare("peak", Opt::Max, Combo::Max, 0.0);
        assert_eq!(a.combine(&b, &r2).get(0), 10.0);
    }

    #[test]
    fn combine_is_associative() {
        let mut r = MetricRegistry::new();
        r.declare("cost", Opt::Min, Combo::Add, 0.5);
        let a = MetricVector::from_values(vec![1.0]);
        let b = MetricVector::from_values(vec![2.0]);
        let c = MetricVector::from_values(vec![3.0]);
        let left = a.combine(&b, &r).combine(&c, &r);
        let right = a.combine(&b.combine(&c, &r), &r);
        assert_eq!(left, right);
    }
}
