//! Graphviz rendering of a dependency graph view.

use crate::graph::{DependencyDag, GraphView};
use crate::requires::{Requirement, RequirementError};

/// Renders a graph view to Graphviz DOT text.
///
/// Construction is guarded: the renderer only exists once the embedder's
/// probe confirms a Graphviz toolchain is available, mirroring the hard
/// failure policy of the `requires` guard.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    dag: DependencyDag,
}

impl DotRenderer {
    /// Checks the `graphviz` requirement against `probe` and, on success,
    /// materializes the view.
    pub fn new(
        view: &GraphView,
        probe: impl FnOnce(&str) -> bool,
    ) -> Result<Self, RequirementError> {
        Requirement::new("graphviz")
            .with_message("graphviz is required to render dependency graphs")
            .guard(probe, || Self {
                dag: DependencyDag::from_view(view),
            })
    }

    pub fn render(&self) -> String {
        self.dag.to_dot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_view() -> GraphView {
        GraphView::new(
            [(
                "branch".to_string(),
                ["root".to_string()].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_renderer_requires_graphviz() {
        let err = DotRenderer::new(&branch_view(), |_| false).unwrap_err();
        assert_eq!(err.dependency, "graphviz");
    }

    #[test]
    fn test_render_emits_dot_for_the_view() {
        let renderer = DotRenderer::new(&branch_view(), |_| true).unwrap();
        let dot = renderer.render();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("branch"));
    }
}
