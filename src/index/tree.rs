//! Binary search tree word index with optional red-black balancing.
//!
//! Every node owns its two subtrees outright. Keys are ordered by byte-wise
//! string comparison and each key appears at most once, carrying the number
//! of times it was inserted.
//!
//! The [`TreeVariant`] is chosen per tree. A [`TreeVariant::Plain`] tree is an
//! ordinary unbalanced BST, so sorted input degenerates it into a list; its
//! insert, search and traversals are therefore iterative. A
//! [`TreeVariant::RedBlack`] tree rebalances on the way back up from every
//! insertion, checking for two reds in a row two levels below each node:
//!
//! | red pair        | other child | action                                   |
//! |-----------------|-------------|------------------------------------------|
//! | left, left      | red         | node red, children black                 |
//! | left, left      | black       | rotate right                             |
//! | left, right     | red         | node red, children black                 |
//! | left, right     | black       | rotate left at left child, rotate right  |
//! | right, left     | red         | node red, children black                 |
//! | right, left     | black       | rotate right at right child, rotate left |
//! | right, right    | red         | node red, children black                 |
//! | right, right    | black       | rotate left                              |
//!
//! After a rotation the new local root is black and the demoted node red,
//! except in the right-left case, which repaints the right child and leaves
//! the demoted left child as it was. Black heights may therefore drift apart.
//! The root is painted black after each insertion, so no red node ever has a
//! red child between insertions.
//!
//! # Examples
//!
//! ```
//! use spellindex::index::tree::{TreeIndex, TreeVariant};
//!
//! let mut tree = TreeIndex::new(TreeVariant::Plain);
//! for word in ["b", "a", "c"] {
//!     tree.insert(word);
//! }
//!
//! let mut keys = Vec::new();
//! tree.inorder(|key| keys.push(key.to_string()));
//! assert_eq!(keys, vec!["a", "b", "c"]);
//! assert!(tree.search("a"));
//! assert!(!tree.search("d"));
//! ```

use std::cmp::Ordering;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::FrequencyIndex;

/// Insertion discipline of a tree, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeVariant {
    /// Unbalanced binary search tree.
    #[default]
    Plain,
    /// Red-black balanced binary search tree.
    RedBlack,
}

/// Node colour; only meaningful in a red-black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Red,
    Black,
}

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    key: String,
    frequency: u32,
    colour: Colour,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(key: &str) -> Box<Node> {
        Box::new(Node {
            key: key.to_string(),
            frequency: 1,
            colour: Colour::Red,
            left: None,
            right: None,
        })
    }
}

fn is_red(link: &Link) -> bool {
    matches!(link, Some(node) if node.colour == Colour::Red)
}

fn paint(link: &mut Link, colour: Colour) {
    if let Some(node) = link {
        node.colour = colour;
    }
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    match node.right.take() {
        Some(mut root) => {
            node.right = root.left.take();
            root.left = Some(node);
            root
        }
        None => node,
    }
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    match node.left.take() {
        Some(mut root) => {
            node.left = root.right.take();
            root.right = Some(node);
            root
        }
        None => node,
    }
}

/// Push a black node's redness down into its two red children.
fn split(node: &mut Node) {
    node.colour = Colour::Red;
    paint(&mut node.left, Colour::Black);
    paint(&mut node.right, Colour::Black);
}

/// Repair a red-red violation two levels below `node`. Patterns are checked in
/// a fixed order and only the first match is handled.
fn fixup(mut node: Box<Node>) -> Box<Node> {
    let left_red = is_red(&node.left);
    let right_red = is_red(&node.right);
    let left_left = left_red && node.left.as_ref().is_some_and(|n| is_red(&n.left));
    let left_right = left_red && node.left.as_ref().is_some_and(|n| is_red(&n.right));
    let right_left = right_red && node.right.as_ref().is_some_and(|n| is_red(&n.left));
    let right_right = right_red && node.right.as_ref().is_some_and(|n| is_red(&n.right));

    if left_left {
        if right_red {
            split(&mut node);
        } else {
            node = rotate_right(node);
            node.colour = Colour::Black;
            paint(&mut node.right, Colour::Red);
        }
    } else if left_right {
        if right_red {
            split(&mut node);
        } else {
            node.left = node.left.take().map(rotate_left);
            node = rotate_right(node);
            node.colour = Colour::Black;
            paint(&mut node.right, Colour::Red);
        }
    } else if right_left {
        if left_red {
            split(&mut node);
        } else {
            node.right = node.right.take().map(rotate_right);
            node = rotate_left(node);
            node.colour = Colour::Black;
            paint(&mut node.right, Colour::Red);
        }
    } else if right_right {
        if left_red {
            split(&mut node);
        } else {
            node = rotate_left(node);
            node.colour = Colour::Black;
            paint(&mut node.left, Colour::Red);
        }
    }

    node
}

/// Recursive red-black insertion. Returns the new subtree root and the
/// inserted key's frequency.
fn insert_balanced(link: Link, word: &str) -> (Box<Node>, u32) {
    let mut node = match link {
        Some(node) => node,
        None => return (Node::leaf(word), 1),
    };

    let frequency = match word.cmp(node.key.as_str()) {
        Ordering::Less => {
            let (child, frequency) = insert_balanced(node.left.take(), word);
            node.left = Some(child);
            frequency
        }
        Ordering::Greater => {
            let (child, frequency) = insert_balanced(node.right.take(), word);
            node.right = Some(child);
            frequency
        }
        Ordering::Equal => {
            node.frequency += 1;
            node.frequency
        }
    };

    (fixup(node), frequency)
}

/// Word-frequency binary search tree.
#[derive(Debug)]
pub struct TreeIndex {
    root: Link,
    variant: TreeVariant,
    len: usize,
}

impl TreeIndex {
    /// Create an empty tree using the given insertion discipline.
    pub fn new(variant: TreeVariant) -> Self {
        log::debug!("creating tree index: variant={variant:?}");
        TreeIndex {
            root: None,
            variant,
            len: 0,
        }
    }

    /// The insertion discipline of this tree.
    pub fn variant(&self) -> TreeVariant {
        self.variant
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Colour of the root node, if any.
    pub fn root_colour(&self) -> Option<Colour> {
        self.root.as_ref().map(|node| node.colour)
    }

    /// Count one more occurrence of `word`, returning its new frequency.
    pub fn insert(&mut self, word: &str) -> u32 {
        let frequency = match self.variant {
            TreeVariant::Plain => self.insert_plain(word),
            TreeVariant::RedBlack => {
                let (root, frequency) = insert_balanced(self.root.take(), word);
                self.root = Some(root);
                paint(&mut self.root, Colour::Black);
                frequency
            }
        };

        if frequency == 1 {
            self.len += 1;
        }
        frequency
    }

    fn insert_plain(&mut self, word: &str) -> u32 {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            match word.cmp(node.key.as_str()) {
                Ordering::Less => cursor = &mut node.left,
                Ordering::Greater => cursor = &mut node.right,
                Ordering::Equal => {
                    node.frequency += 1;
                    return node.frequency;
                }
            }
        }

        *cursor = Some(Node::leaf(word));
        1
    }

    fn find(&self, word: &str) -> Option<&Node> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match word.cmp(node.key.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Check whether `word` is in the tree.
    pub fn search(&self, word: &str) -> bool {
        self.find(word).is_some()
    }

    /// Get the frequency of `word`, 0 if it is absent.
    pub fn frequency(&self, word: &str) -> u32 {
        self.find(word).map_or(0, |node| node.frequency)
    }

    /// Visit keys in ascending order.
    pub fn inorder<F>(&self, mut visitor: F)
    where
        F: FnMut(&str),
    {
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    visitor(&node.key);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }
    }

    /// Visit `(frequency, key)` with each node before its subtrees.
    pub fn preorder<F>(&self, mut visitor: F)
    where
        F: FnMut(u32, &str),
    {
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            visitor(node.frequency, &node.key);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Release every node, children before their parent.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            if node.left.is_none() && node.right.is_none() {
                continue;
            }
            let left = node.left.take();
            let right = node.right.take();
            stack.push(node);
            stack.extend(right);
            stack.extend(left);
        }
        self.len = 0;
    }

    /// Write a Graphviz DOT description of the tree.
    ///
    /// Render it with `dot -Tpdf < tree-view.dot > tree-view.pdf`.
    pub fn write_dot<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        enum Step<'a> {
            Visit(&'a Node),
            Edge(&'a Node, &'static str, &'a Node),
        }

        writeln!(out, "digraph tree {{")?;
        writeln!(out, "node [shape = Mrecord, penwidth = 2];")?;

        let mut stack: Vec<Step<'_>> =
            self.root.as_deref().map(Step::Visit).into_iter().collect();
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(node) => {
                    let colour = if self.variant == TreeVariant::RedBlack
                        && node.colour == Colour::Red
                    {
                        "red"
                    } else {
                        "black"
                    };
                    writeln!(
                        out,
                        "\"{}\"[label=\"{{<f0>{}:{}|{{<f1>|<f2>}}}}\"color={}];",
                        node.key, node.key, node.frequency, colour
                    )?;
                    if let Some(right) = node.right.as_deref() {
                        stack.push(Step::Edge(node, "f2", right));
                        stack.push(Step::Visit(right));
                    }
                    if let Some(left) = node.left.as_deref() {
                        stack.push(Step::Edge(node, "f1", left));
                        stack.push(Step::Visit(left));
                    }
                }
                Step::Edge(parent, port, child) => {
                    writeln!(out, "\"{}\":{} -> \"{}\":f0;", parent.key, port, child.key)?;
                }
            }
        }

        writeln!(out, "}}")?;
        Ok(())
    }

    /// Count red nodes that have a red child.
    #[cfg(test)]
    pub(crate) fn red_red_violations(&self) -> usize {
        let mut violations = 0;
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.colour == Colour::Red && (is_red(&node.left) || is_red(&node.right)) {
                violations += 1;
            }
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        violations
    }
}

impl Drop for TreeIndex {
    fn drop(&mut self) {
        self.clear();
    }
}

impl FrequencyIndex for TreeIndex {
    fn insert(&mut self, word: &str) -> Result<u32> {
        Ok(TreeIndex::insert(self, word))
    }

    fn frequency(&self, word: &str) -> u32 {
        TreeIndex::frequency(self, word)
    }

    fn len(&self) -> usize {
        TreeIndex::len(self)
    }

    fn for_each_entry(&self, visitor: &mut dyn FnMut(u32, &str)) {
        self.preorder(visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(variant: TreeVariant, words: &[&str]) -> TreeIndex {
        let mut tree = TreeIndex::new(variant);
        for word in words {
            tree.insert(word);
        }
        tree
    }

    fn inorder_keys(tree: &TreeIndex) -> Vec<String> {
        let mut keys = Vec::new();
        tree.inorder(|key| keys.push(key.to_string()));
        keys
    }

    fn preorder_entries(tree: &TreeIndex) -> Vec<(String, u32)> {
        let mut entries = Vec::new();
        tree.preorder(|freq, key| entries.push((key.to_string(), freq)));
        entries
    }

    #[test]
    fn test_plain_example() {
        let tree = build(TreeVariant::Plain, &["b", "a", "c"]);
        assert_eq!(inorder_keys(&tree), vec!["a", "b", "c"]);
        assert_eq!(
            preorder_entries(&tree),
            vec![
                ("b".to_string(), 1),
                ("a".to_string(), 1),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_frequency_counting() {
        for variant in [TreeVariant::Plain, TreeVariant::RedBlack] {
            let mut tree = TreeIndex::new(variant);
            assert_eq!(tree.insert("echo"), 1);
            assert_eq!(tree.insert("alpha"), 1);
            assert_eq!(tree.insert("echo"), 2);
            assert_eq!(tree.insert("echo"), 3);

            assert_eq!(tree.len(), 2);
            assert_eq!(tree.frequency("echo"), 3);
            assert_eq!(tree.frequency("alpha"), 1);
            assert_eq!(tree.frequency("zulu"), 0);
            assert!(tree.search("alpha"));
            assert!(!tree.search("zulu"));
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree = TreeIndex::new(TreeVariant::RedBlack);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.root_colour(), None);
        assert!(!tree.search("anything"));
        assert!(inorder_keys(&tree).is_empty());
    }

    #[test]
    fn test_red_black_left_left_rotation() {
        let tree = build(TreeVariant::RedBlack, &["c", "b", "a"]);
        assert_eq!(
            preorder_entries(&tree),
            vec![
                ("b".to_string(), 1),
                ("a".to_string(), 1),
                ("c".to_string(), 1)
            ]
        );
        assert_eq!(tree.root_colour(), Some(Colour::Black));
        assert_eq!(tree.red_red_violations(), 0);
    }

    #[test]
    fn test_red_black_double_rotations() {
        let left_right = build(TreeVariant::RedBlack, &["c", "a", "b"]);
        let right_left = build(TreeVariant::RedBlack, &["a", "c", "b"]);
        let right_right = build(TreeVariant::RedBlack, &["a", "b", "c"]);

        for tree in [&left_right, &right_left, &right_right] {
            let roots: Vec<String> = preorder_entries(tree)
                .into_iter()
                .map(|(key, _)| key)
                .collect();
            assert_eq!(roots, vec!["b", "a", "c"]);
            assert_eq!(tree.height(), 2);
            assert_eq!(tree.red_red_violations(), 0);
        }
    }

    fn colours(tree: &TreeIndex) -> (Colour, Colour, Colour) {
        let root = tree.root.as_ref().unwrap();
        (
            root.colour,
            root.left.as_ref().unwrap().colour,
            root.right.as_ref().unwrap().colour,
        )
    }

    #[test]
    fn test_red_black_colours_after_rotation() {
        use Colour::{Black, Red};

        // The right-left case only repaints the right child, so the demoted
        // node keeps its black colour.
        let right_left = build(TreeVariant::RedBlack, &["a", "c", "b"]);
        assert_eq!(colours(&right_left), (Black, Black, Red));

        let left_right = build(TreeVariant::RedBlack, &["c", "a", "b"]);
        assert_eq!(colours(&left_right), (Black, Red, Red));

        let right_right = build(TreeVariant::RedBlack, &["a", "b", "c"]);
        assert_eq!(colours(&right_right), (Black, Red, Red));
    }

    #[test]
    fn test_right_left_fixup_shapes_later_inserts() {
        // "a" stays black after the right-left case, so "d" triggers a rotation
        // at "b" instead of a split.
        let tree = build(TreeVariant::RedBlack, &["a", "c", "b", "d"]);
        let keys: Vec<String> = preorder_entries(&tree)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["c", "b", "a", "d"]);
        assert_eq!(colours(&tree), (Colour::Black, Colour::Red, Colour::Red));
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.red_red_violations(), 0);
    }

    #[test]
    fn test_red_black_stays_shallow_on_sorted_input() {
        let words: Vec<String> = (0..1024).map(|i| format!("w{i:05}")).collect();

        let mut balanced = TreeIndex::new(TreeVariant::RedBlack);
        let mut plain = TreeIndex::new(TreeVariant::Plain);
        for word in &words {
            balanced.insert(word);
            plain.insert(word);
        }

        assert_eq!(plain.height(), 1024);
        assert!(balanced.height() <= 2 * 11, "height {}", balanced.height());
        assert_eq!(balanced.red_red_violations(), 0);
        assert_eq!(inorder_keys(&balanced), inorder_keys(&plain));
    }

    #[test]
    fn test_deep_plain_tree_is_safe() {
        let mut tree = TreeIndex::new(TreeVariant::Plain);
        for i in 0..10_000 {
            tree.insert(&format!("{i:06}"));
        }
        assert_eq!(tree.len(), 10_000);
        assert_eq!(tree.height(), 10_000);
        assert!(tree.search("009999"));

        let mut count = 0;
        tree.preorder(|_, _| count += 1);
        assert_eq!(count, 10_000);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_write_dot() {
        let tree = build(TreeVariant::RedBlack, &["b", "a", "c", "b"]);
        let mut out = Vec::new();
        tree.write_dot(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = concat!(
            "digraph tree {\n",
            "node [shape = Mrecord, penwidth = 2];\n",
            "\"b\"[label=\"{<f0>b:2|{<f1>|<f2>}}\"color=black];\n",
            "\"a\"[label=\"{<f0>a:1|{<f1>|<f2>}}\"color=red];\n",
            "\"b\":f1 -> \"a\":f0;\n",
            "\"c\"[label=\"{<f0>c:1|{<f1>|<f2>}}\"color=red];\n",
            "\"b\":f2 -> \"c\":f0;\n",
            "}\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_dot_plain_is_black() {
        let tree = build(TreeVariant::Plain, &["m"]);
        let mut out = Vec::new();
        tree.write_dot(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("color=black"));
        assert!(!text.contains("color=red"));
    }
}
