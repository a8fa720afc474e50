use crate::{Path, PathKey};

#[test]
fn empty_path() {
    let path = Path::empty();
    assert!(path.is_empty());
    assert_eq!(path.depth(), 0);
    assert_eq!(path.key(), None);
    assert_eq!(path.to_string(), "");
}

#[test]
fn render_dotted() {
    let path = Path::root().field("params").index(0).field("name");
    assert_eq!(path.to_string(), "root.params.0.name");
    assert_eq!(path.depth(), 4);
    assert_eq!(path.key(), Some(&PathKey::Field("name".into())));
}

#[test]
fn structural_equality() {
    let a = Path::root().field("left");
    let b = Path::root().field("left");
    let c = Path::root().field("right");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, Path::root());
    assert_eq!(a.parent(), Some(&Path::root()));
}

#[test]
fn field_and_index_steps_differ() {
    let field = Path::root().field("0");
    let index = Path::root().index(0);
    assert_eq!(field.to_string(), index.to_string());
    assert_ne!(field, index);
}

#[test]
fn starts_with_ancestors() {
    let base = Path::root().field("body");
    let deep = base.index(2).field("argument");

    assert!(deep.starts_with(&base));
    assert!(deep.starts_with(&deep));
    assert!(deep.starts_with(&Path::empty()));
    assert!(!base.starts_with(&deep));
    assert!(!deep.starts_with(&Path::root().field("head")));
}

#[test]
fn keys_root_to_leaf() {
    let path = Path::root().index(3);
    assert_eq!(
        path.keys(),
        vec![&PathKey::Field("root".into()), &PathKey::Index(3)]
    );
}
