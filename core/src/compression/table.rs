use tracing::debug;

use crate::compression::tree::Node;
use crate::compression::types::{Code, CodeTable};
use crate::constants::MAX_CODE_LEN;
use crate::types::HuffError;

/// Walk `root` depth-first, giving each leaf its guard-bit-prefixed code.
///
/// The root starts at `Code::GUARD`; left appends 0, right appends 1. Trees whose
/// deepest leaf would need more than `MAX_CODE_LEN` bits are rejected up front.
pub fn build_table(root: &Node) -> Result<CodeTable, HuffError> {
    let (symbol, depth) = root.deepest_leaf();
    let length = depth.saturating_add(1);
    if length > MAX_CODE_LEN {
        return Err(HuffError::CodeOverflow { symbol, length, max: MAX_CODE_LEN });
    }

    let mut table = CodeTable::new();
    assign(root, Code::GUARD, &mut table);
    debug!(codes = table.len(), max_length = table.max_length(), "built code table");
    Ok(table)
}

fn assign(node: &Node, code: Code, table: &mut CodeTable) {
    match node {
        Node::Leaf { symbol, .. } => table.insert(*symbol, code),
        Node::Internal { left, right, .. } => {
            assign(left, code.left(), table);
            assign(right, code.right(), table);
        }
    }
}
