use std::fmt::Write;

use crate::cfg::graph::ProgramGraph;

impl ProgramGraph {
    /// Renders the graph in Graphviz DOT format.
    ///
    /// Nodes are named by their label (`Entry`, `Exit`, `q1`, ...) and each
    /// edge carries the rendered command or guard.
    ///
    /// # Example
    /// ```
    /// use gcl::build_cfg;
    ///
    /// let dot = build_cfg("x := 1").unwrap().to_dot();
    ///
    /// assert!(dot.starts_with("digraph program_graph {"));
    /// assert!(dot.contains("Entry -> Exit [label=\"x := 1\"];"));
    /// ```
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut s = String::from("digraph program_graph {\n");
        for name in self.nodes() {
            let _ = writeln!(s, "  {name};");
        }
        for (from, to, label) in self.edges() {
            let _ = writeln!(s, "  {from} -> {to} [label=\"{}\"];", escape(&label));
        }
        s.push('}');
        s
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
