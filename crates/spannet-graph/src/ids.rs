use spannet_core::NodeId;

/// Converts a [`NodeId`] into its index within the coordinate array.
pub(crate) fn node_index(id: NodeId) -> usize {
    id.as_raw() as usize
}

/// Creates a [`NodeId`] from a coordinate-array index.
pub(crate) fn make_node(index: usize) -> NodeId {
    NodeId::from_raw(index as u64)
}
