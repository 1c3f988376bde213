//! Frame model - the structural problem definition

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, Session};
use crate::elements::{Element, Node, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::NodeLoad;
use crate::results::AnalysisResults;
use crate::tables::ModelTables;

/// A planar frame: nodes, elements, supports and nodal loads.
///
/// Nodes and elements are identified by their 1-based position. The model
/// never stores results; each call to [`FrameModel::analyze`] runs a fresh
/// [`Session`] and returns its output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameModel {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    supports: Vec<(usize, Support)>,
    loads: Vec<(usize, NodeLoad)>,
}

impl FrameModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate a model from the tabular interface
    pub fn from_tables(tables: &ModelTables) -> FrameResult<Self> {
        tables.to_model()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node and return its 1-based id
    pub fn add_node(&mut self, node: Node) -> FrameResult<usize> {
        if !node.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "node {} has non-finite coordinates",
                self.nodes.len() + 1
            )));
        }
        self.nodes.push(node);
        Ok(self.nodes.len())
    }

    /// Add an element and return its 1-based id
    pub fn add_element(&mut self, element: Element) -> FrameResult<usize> {
        let id = self.elements.len() + 1;
        self.check_element(id, &element)?;
        self.elements.push(element);
        Ok(id)
    }

    /// Add a support condition. A later support at the same node replaces
    /// the earlier one.
    pub fn add_support(&mut self, node: usize, support: Support) -> FrameResult<()> {
        self.check_node(node)?;
        self.supports.push((node, support));
        Ok(())
    }

    /// Add a node load. Loads at the same node add up.
    pub fn add_node_load(&mut self, node: usize, load: NodeLoad) -> FrameResult<()> {
        self.check_node(node)?;
        if !load.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "load at node {} has non-finite components",
                node
            )));
        }
        self.loads.push((node, load));
        Ok(())
    }

    // ========================
    // Accessors
    // ========================

    /// Get a node by 1-based id
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id.checked_sub(1)?)
    }

    /// Get an element by 1-based id
    pub fn element(&self, id: usize) -> Option<&Element> {
        self.elements.get(id.checked_sub(1)?)
    }

    /// All nodes, index = id - 1
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All elements, index = id - 1
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Support entries in insertion order
    pub fn supports(&self) -> &[(usize, Support)] {
        &self.supports
    }

    /// Load entries in insertion order
    pub fn loads(&self) -> &[(usize, NodeLoad)] {
        &self.loads
    }

    /// Effective support at a node (the last entry wins, free if none)
    pub fn support_at(&self, node: usize) -> Support {
        self.supports
            .iter()
            .rev()
            .find(|(n, _)| *n == node)
            .map(|(_, support)| *support)
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    // ========================
    // Validation and Analysis
    // ========================

    /// Check references and properties of the whole model
    pub fn validate(&self) -> FrameResult<()> {
        if self.nodes.len() < 2 {
            return Err(FrameError::InvalidInput(
                "a frame needs at least two nodes".to_string(),
            ));
        }
        if self.elements.is_empty() {
            return Err(FrameError::InvalidInput(
                "a frame needs at least one element".to_string(),
            ));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if !node.is_finite() {
                return Err(FrameError::InvalidInput(format!(
                    "node {} has non-finite coordinates",
                    index + 1
                )));
            }
        }
        for (index, element) in self.elements.iter().enumerate() {
            self.check_element(index + 1, element)?;
        }
        for (node, _) in &self.supports {
            self.check_node(*node)?;
        }
        for (node, load) in &self.loads {
            self.check_node(*node)?;
            if !load.is_finite() {
                return Err(FrameError::InvalidInput(format!(
                    "load at node {} has non-finite components",
                    node
                )));
            }
        }
        Ok(())
    }

    /// Run a linear static analysis with default options
    pub fn analyze(&self) -> FrameResult<AnalysisResults> {
        self.analyze_with(AnalysisOptions::default())
    }

    /// Run a linear static analysis with custom options
    pub fn analyze_with(&self, options: AnalysisOptions) -> FrameResult<AnalysisResults> {
        self.validate()?;
        Session::new(self, options).run()
    }

    fn check_node(&self, node: usize) -> FrameResult<()> {
        if node == 0 || node > self.nodes.len() {
            return Err(FrameError::NodeNotFound(node));
        }
        Ok(())
    }

    fn check_element(&self, id: usize, element: &Element) -> FrameResult<()> {
        self.check_node(element.start)?;
        self.check_node(element.end)?;
        if element.start == element.end {
            return Err(FrameError::InvalidInput(format!(
                "element {} connects node {} to itself",
                id, element.start
            )));
        }
        element.validate_properties(id)
    }
}
