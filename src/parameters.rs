use super::*;

/// Which transition model the preprocessing should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkMode {
    /// Classic second-order node2vec transitions.
    Homogeneous,
    /// Edge-type aware transitions: the jump parameter redistributes
    /// the probability mass towards the neighbours reached through a
    /// different edge type than the one just traversed.
    HeterogeneousByEdgeType,
}

/// Weights of the biased second-order random walks.
///
/// All the parameters must be strictly positive finite numbers; they
/// default to 1.0, which makes the walk a plain weighted first-order
/// walk whatever the mode.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkWeights {
    /// The p parameter of node2vec: the transition weight towards the
    /// node the walk comes from is divided by it.
    pub(crate) return_param: ParamsT,
    /// The q parameter of node2vec: the transition weight towards the
    /// nodes that are not neighbours of the previous node is divided
    /// by it.
    pub(crate) explore_param: ParamsT,
    /// The gamma parameter of the edge-type aware walks: the share of
    /// probability mass granted to every edge type different from the
    /// one just traversed.
    pub(crate) jump_param: ParamsT,
    /// Reserved for a node-type aware mode: accepted and validated
    /// but currently never consumed by the scoring.
    pub(crate) change_node_type_weight: ParamsT,
    /// Reserved as above: the edge-type bias is driven by the jump
    /// parameter.
    pub(crate) change_edge_type_weight: ParamsT,
}

impl Default for WalkWeights {
    fn default() -> WalkWeights {
        WalkWeights {
            return_param: 1.0,
            explore_param: 1.0,
            jump_param: 1.0,
            change_node_type_weight: 1.0,
            change_edge_type_weight: 1.0,
        }
    }
}

impl WalkWeights {
    fn validate_weight(name: &str, weight: Option<ParamsT>) -> Result<Option<ParamsT>> {
        match weight {
            None => Ok(None),
            Some(weight) => {
                if !weight.is_finite() || weight <= 0.0 {
                    Err(format!(
                        "The given {} is {} but walk weights must be strictly positive real numbers.",
                        name, weight
                    ))
                } else {
                    Ok(Some(weight))
                }
            }
        }
    }

    /// Set the return parameter (p) of the walks.
    ///
    /// # Arguments
    ///
    /// * `return_param`: Option<ParamsT> - The return parameter, must be strictly positive.
    pub fn set_return_param(mut self, return_param: Option<ParamsT>) -> Result<WalkWeights> {
        if let Some(return_param) = WalkWeights::validate_weight("return parameter", return_param)? {
            self.return_param = return_param;
        }
        Ok(self)
    }

    /// Set the in-out parameter (q) of the walks.
    ///
    /// # Arguments
    ///
    /// * `explore_param`: Option<ParamsT> - The in-out parameter, must be strictly positive.
    pub fn set_explore_param(mut self, explore_param: Option<ParamsT>) -> Result<WalkWeights> {
        if let Some(explore_param) = WalkWeights::validate_weight("in-out parameter", explore_param)?
        {
            self.explore_param = explore_param;
        }
        Ok(self)
    }

    /// Set the edge-type jump parameter (gamma) of the walks.
    ///
    /// # Arguments
    ///
    /// * `jump_param`: Option<ParamsT> - The jump parameter, must be strictly positive.
    pub fn set_jump_param(mut self, jump_param: Option<ParamsT>) -> Result<WalkWeights> {
        if let Some(jump_param) = WalkWeights::validate_weight("jump parameter", jump_param)? {
            self.jump_param = jump_param;
        }
        Ok(self)
    }

    /// Set the node-type change weight of the walks.
    ///
    /// # Arguments
    ///
    /// * `change_node_type_weight`: Option<ParamsT> - The weight, must be strictly positive.
    pub fn set_change_node_type_weight(
        mut self,
        change_node_type_weight: Option<ParamsT>,
    ) -> Result<WalkWeights> {
        if let Some(weight) =
            WalkWeights::validate_weight("change node type weight", change_node_type_weight)?
        {
            self.change_node_type_weight = weight;
        }
        Ok(self)
    }

    /// Set the edge-type change weight of the walks.
    ///
    /// # Arguments
    ///
    /// * `change_edge_type_weight`: Option<ParamsT> - The weight, must be strictly positive.
    pub fn set_change_edge_type_weight(
        mut self,
        change_edge_type_weight: Option<ParamsT>,
    ) -> Result<WalkWeights> {
        if let Some(weight) =
            WalkWeights::validate_weight("change edge type weight", change_edge_type_weight)?
        {
            self.change_edge_type_weight = weight;
        }
        Ok(self)
    }

    /// Returns boolean representing if the weights make the second
    /// order transitions collapse to the first order ones.
    pub fn is_first_order(&self) -> bool {
        (self.return_param - 1.0).abs() < ParamsT::EPSILON
            && (self.explore_param - 1.0).abs() < ParamsT::EPSILON
    }
}
