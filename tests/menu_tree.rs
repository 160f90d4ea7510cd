use std::collections::HashSet;

use swiftdocs::config::MenuEntry;
use swiftdocs::menu::{menu_rows, MenuError, MenuTree};

const DOCS: &str = "\
- key: start
  file: start.md
  titles: { en: Getting started }
- key: install
  file: install.md
  branch: start
- key: guide
  file: guide.md
- key: orphan
  file: orphan.md
  branch: nowhere
- key: linux
  file: install-linux.md
  branch: install
- key: mac
  file: install-mac.md
  branch: install
";

fn entries(yaml: &str) -> Vec<MenuEntry> {
    serde_yaml::from_str(yaml).expect("valid menu yaml")
}

#[test]
fn every_entry_appears_exactly_once() {
    let tree = MenuTree::build(entries(DOCS)).unwrap();
    let keys: Vec<String> = tree
        .walk()
        .map(|(id, _)| tree.node(id).entry.key.clone())
        .collect();

    assert_eq!(keys.len(), 6);
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), 6);
    assert_eq!(
        keys,
        ["start", "install", "linux", "mac", "guide", "orphan"]
    );
}

#[test]
fn parents_and_children_agree() {
    let tree = MenuTree::build(entries(DOCS)).unwrap();
    for (id, depth) in tree.walk() {
        let node = tree.node(id);
        match node.parent {
            Some(parent) => {
                assert!(tree.children(parent).contains(&id));
                assert_eq!(node.entry.branch.as_deref(), Some(tree.node(parent).entry.key.as_str()));
            }
            None => {
                assert_eq!(depth, 0);
                assert!(tree.roots().contains(&id));
            }
        }
        assert_eq!(tree.ancestors(id).len(), depth);
    }
}

#[test]
fn unknown_branch_becomes_a_root() {
    let tree = MenuTree::build(entries(DOCS)).unwrap();
    let orphan = tree.find_by_key("orphan").unwrap();
    assert!(tree.node(orphan).parent.is_none());
    assert!(tree.roots().contains(&orphan));
}

#[test]
fn rows_follow_depth_and_language() {
    let tree = MenuTree::build(entries(DOCS)).unwrap();
    let rows = menu_rows(&tree, "en", Some("install-mac.md"));

    let summary: Vec<_> = rows
        .iter()
        .map(|row| (row.title.as_str(), row.depth, row.active))
        .collect();
    assert_eq!(
        summary,
        [
            ("Getting started", 0, false),
            ("install.md", 1, false),
            ("install-linux.md", 2, false),
            ("install-mac.md", 2, true),
            ("guide.md", 0, false),
            ("orphan.md", 0, false),
        ]
    );
}

#[test]
fn cycles_are_rejected() {
    let yaml = "\
- key: a
  file: a.md
  branch: c
- key: b
  file: b.md
  branch: a
- key: c
  file: c.md
  branch: b
";
    match MenuTree::build(entries(yaml)) {
        Err(MenuError::CyclicHierarchy(keys)) => {
            assert!(keys.contains(&String::from("a")));
            assert!(keys.contains(&String::from("b")));
            assert!(keys.contains(&String::from("c")));
        }
        other => panic!("expected a cycle error, got {other:?}"),
    }
}

#[test]
fn export_nests_children() {
    let tree = MenuTree::build(entries(DOCS)).unwrap();
    let json = serde_json::to_value(tree.export()).unwrap();

    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["key"], "start");
    assert_eq!(json[0]["titles"]["en"], "Getting started");
    assert_eq!(json[0]["children"][0]["children"][1]["file"], "install-mac.md");
}
