//! The in-memory file tree shown on the desktop
//!
//! Built once at startup. The only change it ever sees is the secret file
//! turning into a playable video when Snake is won.

use std::collections::HashSet;

/// Identifier of the item unlocked by winning Snake.
pub const SECRET_ID: &str = "secret_file";
pub const MY_PC_ID: &str = "my_pc";
pub const TUTORIAL_ID: &str = "tutorial";
pub const SNAKE_ID: &str = "snake_game";
pub const PAINT_ID: &str = "paint_app";

const SECRET_NAME: &str = "VIDEO +18.mp4";
const SECRET_VIDEO: &str = "zZ6vybT1HQs";

const TUTORIAL_TEXT: &str = "WELCOME TO VISION OS v1.0\n\nGUIDE:\n1. Double-click icons to open applications or files.\n2. Drag windows to organize your workspace.\n3. Use the maximize/minimize buttons in the top-right of windows.\n4. 'My PC' shows all your files in one place.\n5. Win the Snake game to unlock the secret file!\n\nEnjoy exploring!\n\n- Jules";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Folder,
    Text,
    Application,
    Locked,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Text body, video id, or an application tag.
    pub content: Option<String>,
    /// Only folders have children.
    pub children: Vec<FileSystemItem>,
    pub locked: bool,
}

impl FileSystemItem {
    fn new(id: &str, name: &str, kind: ItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            content: None,
            children: Vec::new(),
            locked: false,
        }
    }

    pub fn text(id: &str, name: &str, body: &str) -> Self {
        Self::new(id, name, ItemKind::Text).with_content(body)
    }

    pub fn folder(id: &str, name: &str, children: Vec<FileSystemItem>) -> Self {
        Self {
            children,
            ..Self::new(id, name, ItemKind::Folder)
        }
    }

    pub fn app(id: &str, name: &str, tag: &str) -> Self {
        Self::new(id, name, ItemKind::Application).with_content(tag)
    }

    pub fn locked(id: &str, name: &str, content: &str) -> Self {
        Self {
            locked: true,
            ..Self::new(id, name, ItemKind::Locked).with_content(content)
        }
    }

    fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// The "My PC" folder: a copy of the top level of the tree as it is now.
pub fn my_pc(tree: &[FileSystemItem]) -> FileSystemItem {
    FileSystemItem::folder(MY_PC_ID, "My PC", tree.to_vec())
}

pub fn tutorial() -> FileSystemItem {
    FileSystemItem::text(TUTORIAL_ID, "Tutorial", TUTORIAL_TEXT)
}

/// Top-level items
#[derive(Debug, Clone)]
pub struct FileTree {
    items: Vec<FileSystemItem>,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::initial()
    }
}

impl FileTree {
    pub fn new(items: Vec<FileSystemItem>) -> Self {
        Self { items }
    }

    pub fn initial() -> Self {
        Self::new(vec![
            FileSystemItem::text(
                "about",
                "About Me.txt",
                "HELLO WORLD!\n\nI am a creative developer based in the digital realm.\n\nThis portfolio mimics a retro operating system.",
            ),
            FileSystemItem::folder(
                "projects",
                "Projects",
                vec![
                    FileSystemItem::text("p1", "Blender Animation", "Check out my latest 3D work. (See intro video!)"),
                    FileSystemItem::text("p2", "Retro Website", "You are looking at it right now."),
                ],
            ),
            FileSystemItem::app(SNAKE_ID, "Snake.exe", "Game Application"),
            FileSystemItem::app(PAINT_ID, "Paint.exe", "Paint Application"),
            FileSystemItem::locked(SECRET_ID, SECRET_NAME, SECRET_VIDEO),
            FileSystemItem::folder("trash", "Trash", Vec::new()),
        ])
    }

    pub fn items(&self) -> &[FileSystemItem] {
        &self.items
    }

    /// Depth-first lookup anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&FileSystemItem> {
        fn walk<'a>(items: &'a [FileSystemItem], id: &str) -> Option<&'a FileSystemItem> {
            items
                .iter()
                .find_map(|item| if item.id == id { Some(item) } else { walk(&item.children, id) })
        }
        walk(&self.items, id)
    }

    /// Turn the secret file into a playable video. Returns `false` if it was
    /// already unlocked (or missing), so callers can tell the first unlock apart.
    pub fn unlock_secret(&mut self) -> bool {
        match self.items.iter_mut().find(|item| item.id == SECRET_ID) {
            Some(item) if item.locked => {
                item.kind = ItemKind::Video;
                item.locked = false;
                item.name = SECRET_NAME.to_string();
                item.content = Some(SECRET_VIDEO.to_string());
                true
            }
            _ => false,
        }
    }

    /// First identifier that appears twice, if any.
    pub fn first_duplicate_id(&self) -> Option<&str> {
        fn walk<'a>(items: &'a [FileSystemItem], seen: &mut HashSet<&'a str>) -> Option<&'a str> {
            for item in items {
                if !seen.insert(item.id.as_str()) {
                    return Some(item.id.as_str());
                }
                if let Some(dup) = walk(&item.children, seen) {
                    return Some(dup);
                }
            }
            None
        }
        walk(&self.items, &mut HashSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tree() {
        let tree = FileTree::initial();
        let ids: Vec<&str> = tree.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["about", "projects", "snake_game", "paint_app", "secret_file", "trash"]);
        assert_eq!(tree.find("p2").map(|i| i.name.as_str()), Some("Retro Website"));
        assert!(tree.find("trash").map_or(false, |t| t.children.is_empty()));
        assert_eq!(tree.first_duplicate_id(), None);
    }

    #[test]
    fn test_secret_starts_locked() {
        let tree = FileTree::initial();
        let secret = tree.find(SECRET_ID).expect("secret present");
        assert!(secret.locked);
        assert_eq!(secret.kind, ItemKind::Locked);
        assert!(tree.find(SECRET_ID).map_or(false, |s| s.locked));
    }

    #[test]
    fn test_unlock_once() {
        let mut tree = FileTree::initial();
        assert!(tree.unlock_secret());
        assert!(!tree.unlock_secret());
        let secret = tree.find(SECRET_ID).expect("secret present");
        assert_eq!(secret.kind, ItemKind::Video);
        assert!(!secret.locked);
        assert_eq!(secret.name, "VIDEO +18.mp4");
        assert_eq!(secret.content(), "zZ6vybT1HQs");
    }

    #[test]
    fn test_duplicate_detected_in_children() {
        let tree = FileTree::new(vec![
            FileSystemItem::text("a", "A", ""),
            FileSystemItem::folder("f", "F", vec![FileSystemItem::text("a", "A again", "")]),
        ]);
        assert_eq!(tree.first_duplicate_id(), Some("a"));
    }

    #[test]
    fn test_my_pc_is_a_snapshot() {
        let mut tree = FileTree::initial();
        let before = my_pc(tree.items());
        tree.unlock_secret();
        let secret = before.children.iter().find(|i| i.id == SECRET_ID).expect("secret in snapshot");
        assert!(secret.locked);
        assert_eq!(before.id, MY_PC_ID);
        assert_eq!(before.kind, ItemKind::Folder);
        assert_eq!(before.children.len(), 6);
    }

    #[test]
    fn test_tutorial_text() {
        let t = tutorial();
        assert_eq!(t.id, TUTORIAL_ID);
        assert!(t.content().starts_with("WELCOME TO VISION OS v1.0"));
        assert!(t.content().ends_with("- Jules"));
    }
}
