use indexmap::IndexMap;

use super::Translation;

/// Explicit tagged tree used to rebuild nested literal structures from
/// dotted message ids.
///
/// `insert` creates intermediate branches as needed; a path that runs
/// through or lands on an existing node of a different shape replaces it
/// (later insertions win, consistent with path-order precedence).
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Translation),
    List(Vec<Node>),
    Branch(IndexMap<String, Node>),
}

impl Node {
    pub fn branch() -> Self {
        Node::Branch(IndexMap::new())
    }

    /// Inserts a translation at the dotted path below this node.
    ///
    /// Must be called on a branch; intermediate segments become branches.
    pub fn insert(&mut self, path: &[&str], translation: Translation) {
        let Some((head, rest)) = path.split_first() else {
            return;
        };

        let Node::Branch(children) = self else {
            *self = Node::branch();
            return self.insert(path, translation);
        };

        if rest.is_empty() {
            children.insert((*head).to_string(), Node::Leaf(translation));
        } else {
            let child = children
                .entry((*head).to_string())
                .or_insert_with(Node::branch);
            if !matches!(child, Node::Branch(_)) {
                *child = Node::branch();
            }
            child.insert(rest, translation);
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(_) => false,
            Node::List(items) => items.is_empty(),
            Node::Branch(children) => children.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lang: &str, s: &str) -> Translation {
        Translation::new(lang, s)
    }

    #[test]
    fn insert_creates_intermediate_branches() {
        let mut root = Node::branch();
        root.insert(&["pages", "page", "TITLE"], text("pt-PT", "Título"));

        let Node::Branch(children) = &root else {
            panic!("root must stay a branch")
        };
        let Some(Node::Branch(pages)) = children.get("pages") else {
            panic!("expected pages branch")
        };
        let Some(Node::Branch(page)) = pages.get("page") else {
            panic!("expected page branch")
        };
        assert!(matches!(page.get("TITLE"), Some(Node::Leaf(_))));
    }

    #[test]
    fn sibling_paths_share_branches_in_insertion_order() {
        let mut root = Node::branch();
        root.insert(&["a", "ONE"], text("en-US", "1"));
        root.insert(&["a", "TWO"], text("en-US", "2"));
        root.insert(&["b"], text("en-US", "3"));

        let Node::Branch(children) = &root else {
            panic!("root must stay a branch")
        };
        let keys: Vec<_> = children.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);

        let Some(Node::Branch(a)) = children.get("a") else {
            panic!("expected a branch")
        };
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn later_insertion_replaces_a_conflicting_leaf() {
        let mut root = Node::branch();
        root.insert(&["a"], text("en-US", "leaf"));
        root.insert(&["a", "b"], text("en-US", "nested"));

        let Node::Branch(children) = &root else {
            panic!("root must stay a branch")
        };
        assert!(matches!(children.get("a"), Some(Node::Branch(_))));
    }
}
