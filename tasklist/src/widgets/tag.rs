//! A heading element painted with the nearest provider's fill color.

use listdom::NodeId;

use crate::component::{Component, Task};
use crate::context::Context;

use super::provider::custom_property;

const BACKGROUND_PROPERTY: &str = "--neutral-fill-rest";

#[derive(Debug, Default)]
pub struct SimpleTag {
    background: Option<String>,
}

impl SimpleTag {
    /// The resolved background color, if any provider encloses the tag.
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    fn render(&mut self, node: NodeId, cx: &mut Context) {
        // Start from the parent so our own style is not read back.
        let background = cx
            .doc()
            .parent(node)
            .and_then(|parent| custom_property(cx.doc(), parent, BACKGROUND_PROPERTY));
        let style = background
            .as_deref()
            .map(|color| format!("display: block; background: {color}"));
        cx.doc_mut()
            .reflect_attribute(node, "style", style.as_deref());
        self.background = background;
    }
}

impl Component for SimpleTag {
    fn connected(&mut self, node: NodeId, cx: &mut Context) {
        self.render(node, cx);
    }

    fn run_task(&mut self, node: NodeId, task: Task, cx: &mut Context) {
        if task == Task::Render {
            self.render(node, cx);
        }
    }
}
