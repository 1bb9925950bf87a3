use cigartree::model::{BranchLength, PhyloTree, Vertex};

#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::new(3);
    let index_l1 = tree.add_leaf("A".to_string(), Some(BranchLength::new(1.0)));
    let index_l2 = tree.add_leaf("B".to_string(), Some(BranchLength::new(1.0)));
    let index_l3 = tree.add_leaf("C".to_string(), Some(BranchLength::new(0.5)));
    let index_i1 = tree.add_internal(vec![index_l1, index_l2], None, Some(BranchLength::new(1.5)));
    let index_root = tree.add_internal(vec![index_l3, index_i1], Some("root".to_string()), None);
    tree.set_root(index_root);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.label(), Some("root"));
    assert_eq!(root.children(), &[index_l3, index_i1]);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.label(), Some("B"));
    assert_eq!(l2.parent_index(), Some(index_i1));

    // Internal
    let inti = &tree[index_i1];
    assert!(inti.is_internal());
    assert_eq!(inti.label(), None);
    assert_eq!(inti.branch_length().unwrap(), BranchLength::new(1.5));

    assert_eq!(tree.leaf_labels(), vec!["C", "A", "B"]);
}

#[test]
fn test_unrooted_tree_is_invalid() {
    let mut tree = PhyloTree::new(2);
    let a = tree.add_leaf("A".to_string(), None);
    let b = tree.add_leaf("B".to_string(), None);
    tree.add_internal(vec![a, b], None, None);

    assert!(!tree.is_root_set());
    assert!(!tree.is_valid());
    assert_eq!(tree.post_order_iter().count(), 0);
}

#[test]
fn test_root_with_parent_is_invalid() {
    let mut tree = PhyloTree::new(2);
    let a = tree.add_leaf("A".to_string(), None);
    let b = tree.add_leaf("B".to_string(), None);
    tree.add_internal(vec![a, b], None, None);
    tree.set_root(a);
    assert!(!tree.is_valid());
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = PhyloTree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = PhyloTree::new(2);
    let _ = &tree[55];
}

#[test]
fn test_vertex_kinds() {
    let leaf = Vertex::new_leaf(0, "A".to_string(), Some(BranchLength::new(0.3)));
    assert!(leaf.is_leaf());
    assert!(!leaf.is_internal());
    assert!(leaf.children().is_empty());
    assert!(leaf.is_root());

    let internal = Vertex::new_internal(1, vec![0], None, None);
    assert!(internal.is_internal());
    assert_eq!(internal.label(), None);
    assert_eq!(internal.children(), &[0]);
}

#[test]
fn test_branch_length_serde() {
    let length: BranchLength = serde_json::from_str("0.25").unwrap();
    assert_eq!(*length, 0.25);
    assert_eq!(serde_json::to_string(&length).unwrap(), "0.25");
    assert!(serde_json::from_str::<BranchLength>("-1.0").is_err());
}
