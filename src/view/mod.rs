pub mod recording;
pub mod terminal;

use crate::loader::ContentRef;

/// What the controller is allowed to tell the screen to do.
///
/// Every call is a fire-and-forget instruction. Implementations must cope
/// with being told the same thing twice.
pub trait View: Send + Sync {
    fn set_loading_indicator(&self, visible: bool);
    fn render_content(&self, content: &ContentRef);
    fn enable_action_control(&self, enabled: bool);
    fn play_outro_transition(&self);
    fn restyle_action_control(&self);
}
