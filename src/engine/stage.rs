//! Display list of static images and text nodes

use glam::Vec2;

use super::EngineError;
use crate::config::TextStyle;

/// Handle to a display-list entry
pub type ObjectId = u32;

/// Where a text node's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Image centred at `pos`
    Image { key: String, pos: Vec2 },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
        anchor: Anchor,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Stage {
    items: Vec<(ObjectId, Drawable)>,
    next_id: ObjectId,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, drawable: Drawable) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push((id, drawable));
        id
    }

    pub fn add_image(&mut self, key: &str, pos: Vec2) -> ObjectId {
        self.push(Drawable::Image {
            key: key.to_string(),
            pos,
        })
    }

    pub fn add_text(&mut self, text: &str, pos: Vec2, style: &TextStyle, anchor: Anchor) -> ObjectId {
        self.push(Drawable::Text {
            text: text.to_string(),
            pos,
            style: style.clone(),
            anchor,
        })
    }

    pub fn set_text(&mut self, id: ObjectId, new_text: &str) -> Result<(), EngineError> {
        match self.items.iter_mut().find(|(item_id, _)| *item_id == id) {
            Some((_, Drawable::Text { text, .. })) => {
                if text.as_str() != new_text {
                    *text = new_text.to_string();
                }
                Ok(())
            }
            _ => Err(EngineError::UnknownObject(id)),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Drawable> {
        self.items.iter().map(|(_, d)| d)
    }

    /// All text currently on stage, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.items()
            .filter_map(|d| match d {
                Drawable::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Image keys currently on stage, in draw order
    pub fn images(&self) -> Vec<&str> {
        self.items()
            .filter_map(|d| match d {
                Drawable::Image { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Ids are not reset, so stale handles stay invalid
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_updates_only_text_nodes() {
        let style = TextStyle::new(22, "Consolas", "#FCC");
        let mut stage = Stage::new();
        let bg = stage.add_image("park", Vec2::new(512.0, 360.0));
        let label = stage.add_text("Hits: 0", Vec2::new(900.0, 20.0), &style, Anchor::TopLeft);

        stage.set_text(label, "Hits: 5").unwrap();
        assert_eq!(stage.texts(), vec!["Hits: 5"]);
        assert_eq!(stage.images(), vec!["park"]);
        assert!(matches!(stage.set_text(bg, "x"), Err(EngineError::UnknownObject(_))));
    }

    #[test]
    fn test_cleared_handles_are_stale() {
        let style = TextStyle::new(22, "Consolas", "#FCC");
        let mut stage = Stage::new();
        let label = stage.add_text("Hits: 0", Vec2::ZERO, &style, Anchor::TopLeft);
        stage.clear();
        let other = stage.add_text("Game Over!", Vec2::ZERO, &style, Anchor::Center);

        assert_ne!(label, other);
        assert!(stage.set_text(label, "Hits: 5").is_err());
        assert_eq!(stage.texts(), vec!["Game Over!"]);
        assert!(stage.images().is_empty());
    }
}
