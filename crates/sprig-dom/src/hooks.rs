use crate::node::Node;

/// Optional callbacks attached to a node type.
///
/// Tag types that need lifecycle behavior declare one `static` table and
/// pass it to [`NodeBuilder::hooks`](crate::NodeBuilder::hooks). Nodes
/// without a table pay nothing.
///
/// ```ignore
/// static COUNTER: LifecycleHooks = LifecycleHooks {
///     on_load: Some(|node| { node.add_attribute("data_ready", "1"); }),
///     ..LifecycleHooks::NONE
/// };
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleHooks {
    /// Runs once at the end of construction.
    pub on_load: Option<fn(&mut Node)>,
    /// Runs before the node's markup is written.
    pub before_render: Option<fn(&Node)>,
    /// Runs after the node's markup (and its children's) is written.
    pub after_render: Option<fn(&Node)>,
    /// Runs from [`Node::dispose`], parents before children.
    pub on_dispose: Option<fn(&Node)>,
}

impl LifecycleHooks {
    /// A table with every hook unset.
    pub const NONE: Self = Self {
        on_load: None,
        before_render: None,
        after_render: None,
        on_dispose: None,
    };
}
