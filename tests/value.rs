use anyhow::Result;
use sexptree::read::read_str;
use sexptree::value::{atom, list, Sexp};

#[test]
fn add_child_to_list() {
    let mut doc = Sexp::default();
    doc.add_child("a");
    doc.add_child(atom("b"));
    assert_eq!(doc.child_count(), 2);
    assert_eq!(doc.to_string(), "a b");
}

// Appending to an atom widens it in place: the old text becomes the
// head of a fresh list.
#[test]
fn add_child_widens_atom() {
    let mut node = atom("x");
    node.add_child("y");
    assert_eq!(node, list([atom("x"), atom("y")]));
    assert!(node.is_list());
    assert_eq!(node.child_count(), 2);
}

#[test]
fn child_count_of_atom_is_one() {
    assert_eq!(atom("x").child_count(), 1);
    assert_eq!(Sexp::default().child_count(), 0);
}

#[test]
fn checked_accessors() {
    let node = list([atom("a")]);
    assert_eq!(node.get_child(0), Some(&atom("a")));
    assert_eq!(node.get_child(1), None);
    assert_eq!(node.get_string(), None);

    let leaf = atom("a");
    assert_eq!(leaf.get_string(), Some("a"));
    assert_eq!(leaf.get_child(0), None);
}

#[test]
fn nil() {
    assert!(Sexp::default().is_nil());
    assert!(list([]).is_nil());
    assert!(!atom("").is_nil());
    assert!(!list([atom("a")]).is_nil());
}

#[test]
fn structural_equality() {
    assert_eq!(list([atom("a"), atom("b")]), list([atom("a"), atom("b")]));
    assert_ne!(list([atom("a"), atom("b")]), list([atom("b"), atom("a")]));
    assert_ne!(atom("a"), list([atom("a")]));
    assert_ne!(atom("a"), atom("b"));
}

#[test]
fn deep_clone() {
    let original = list([atom("a"), list([atom("b")])]);
    let mut copy = original.clone();
    copy.get_child_mut(1).unwrap().add_child("c");
    assert_ne!(original, copy);
    assert_eq!(original.to_string(), "a (b)");
}

#[test]
fn path_lookup_descends_by_head() -> Result<()> {
    let doc = read_str("(a (b c))")?;
    let a = doc.child_by_path("a").unwrap();
    // Display always treats its receiver as a root, so no outer parens
    assert_eq!(a.to_string(), "a (b c)");
    let b = doc.child_by_path("a/b").unwrap();
    assert_eq!(b.to_string(), "b c");

    // from inside the form itself, "a" is plain child data, not a
    // descendable (a ...) list, so the same path finds nothing
    let form = doc.get_child(0).unwrap();
    assert!(form.child_by_path("a/b").is_none());
    Ok(())
}

#[test]
fn path_lookup_atom_matches_only_finally() -> Result<()> {
    let doc = read_str("(config (port 8080) debug)")?;
    let port = doc.child_by_path("config/port").unwrap();
    assert_eq!(port.to_string(), "port 8080");
    let value = doc.child_by_path("config/port/8080").unwrap();
    assert_eq!(value.get_string(), Some("8080"));
    let flag = doc.child_by_path("config/debug").unwrap();
    assert!(flag.is_atom());
    // an atom cannot be descended through
    assert!(doc.child_by_path("config/debug/x").is_none());
    Ok(())
}

// The first character is never a separator, so a leading '/' belongs
// to the first segment name.
#[test]
fn path_lookup_leading_slash() -> Result<()> {
    let doc = read_str("(config (port 8080))")?;
    assert!(doc.child_by_path("/config").is_none());
    assert!(doc.child_by_path("config//port").is_none());
    Ok(())
}

#[test]
fn path_lookup_skips_headless_lists() -> Result<()> {
    let doc = read_str("() ((x) y) (a b)")?;
    let a = doc.child_by_path("a").unwrap();
    assert_eq!(a.to_string(), "a b");
    assert!(doc.child_by_path("x").is_none());
    Ok(())
}

#[test]
fn path_lookup_not_found() -> Result<()> {
    let doc = read_str("(a (b c))")?;
    assert!(doc.child_by_path("b").is_none());
    assert!(doc.child_by_path("a/c").is_none());
    assert!(atom("a").child_by_path("a").is_none());
    Ok(())
}

#[test]
fn path_lookup_mut() -> Result<()> {
    let mut doc = read_str("(server (port 80))")?;
    doc.child_by_path_mut("server/port")
        .unwrap()
        .add_child("8080");
    assert_eq!(doc.to_string(), "(server (port 80 8080))");
    Ok(())
}

#[test]
fn arguments_skip_the_head() -> Result<()> {
    let doc = read_str("(head a b c)")?;
    let form = doc.get_child(0).unwrap();
    let args: Vec<&str> =
        form.arguments().filter_map(|a| a.get_string()).collect();
    assert_eq!(args, ["a", "b", "c"]);
    assert_eq!(form.arguments().len(), 3);

    // restartable: a fresh iterator starts over
    assert_eq!(form.arguments().count(), 3);
    Ok(())
}

#[test]
fn arguments_of_small_nodes() -> Result<()> {
    let doc = read_str("(head)")?;
    assert_eq!(doc.get_child(0).unwrap().arguments().count(), 0);
    assert_eq!(Sexp::default().arguments().count(), 0);
    assert_eq!(atom("x").arguments().count(), 0);
    Ok(())
}

#[test]
fn atom_rendering() {
    assert_eq!(atom("x").to_string(), "x");
    assert_eq!(atom("").to_string(), "\"\"");
    assert_eq!(atom("hello world").to_string(), "\"hello world\"");
    // documented limitation: interior quotes are wrapped, not escaped
    assert_eq!(atom("say \"hi\"").to_string(), "\"say \"hi\"\"");
    assert_eq!(atom("back\\slash").to_string(), "back\\slash");
}

#[test]
fn list_rendering() {
    let root = list([list([]), list([atom("a")]), list([atom("a"), atom("b")])]);
    assert_eq!(root.to_string(), "() (a) (a b)");
}

#[test]
fn serialization_is_deterministic() -> Result<()> {
    let doc = read_str("(a (b c) \"d e\")")?;
    assert_eq!(doc.to_string(), doc.to_string());
    assert_eq!(doc.to_string(), "(a (b c) \"d e\")");
    Ok(())
}

// Trees of non-empty, space-free atoms round-trip exactly.
#[test]
fn roundtrip() -> Result<()> {
    let doc = list([
        list([atom("defun"), atom("f"), list([atom("x")])]),
        atom("toplevel"),
        list([]),
    ]);
    let reread = read_str(&doc.to_string())?;
    assert_eq!(reread, doc);
    Ok(())
}
