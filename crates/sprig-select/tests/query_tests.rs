//! Integration tests for querying trees with selectors.

use sprig_dom::{DomTree, ElementData, NodeId, NodeType, parse_json};
use sprig_select::{Combinator, Matcher, collect, compile, default_root, query, query_document};

fn make_element(tag: &str, id: Option<&str>, classes: &[&str]) -> ElementData {
    let mut element = ElementData::new(tag);
    if let Some(id_val) = id {
        element = element.with_attr("id", id_val);
    }
    if !classes.is_empty() {
        element = element.with_attr("class", classes.join(" "));
    }
    element
}

/// `html > body > (div#a.cls, span.cls)`
struct Page {
    tree: DomTree,
    html: NodeId,
    body: NodeId,
    div: NodeId,
    span: NodeId,
}

fn page() -> Page {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, make_element("html", None, &[]));
    let body = tree.append_element(html, make_element("body", None, &[]));
    let div = tree.append_element(body, make_element("div", Some("a"), &["cls"]));
    let span = tree.append_element(body, make_element("span", None, &["cls"]));
    Page {
        tree,
        html,
        body,
        div,
        span,
    }
}

/// `A > B > C`
fn chain() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, make_element("A", None, &[]));
    let b = tree.append_element(a, make_element("B", None, &[]));
    let c = tree.append_element(b, make_element("C", None, &[]));
    (tree, a, b, c)
}

// ========== page scenario ==========

#[test]
fn test_page_scenario() {
    let p = page();
    assert_eq!(query(&p.tree, "div.cls", p.html), vec![p.div]);
    assert_eq!(query(&p.tree, ".cls", p.html), vec![p.div, p.span]);
    assert_eq!(query(&p.tree, "body div", p.html), vec![p.div]);
    assert_eq!(query(&p.tree, "body > div", p.html), vec![p.div]);
    assert_eq!(query(&p.tree, "body > span", p.html), vec![p.span]);
}

#[test]
fn test_query_document_starts_at_body() {
    let p = page();
    assert_eq!(default_root(&p.tree), p.body);
    assert_eq!(query_document(&p.tree, "body"), vec![p.body]);
    assert!(query_document(&p.tree, "html").is_empty());
    assert_eq!(query_document(&p.tree, "html span"), vec![p.span]);
}

#[test]
fn test_default_root_fallbacks() {
    let mut tree = DomTree::new();
    assert_eq!(default_root(&tree), NodeId::ROOT);

    let root = tree.append_element(NodeId::ROOT, make_element("svg", None, &[]));
    let circle = tree.append_element(root, make_element("circle", None, &[]));
    assert_eq!(default_root(&tree), root);
    assert_eq!(query_document(&tree, "svg > circle"), vec![circle]);
}

// ========== simple selectors ==========

#[test]
fn test_id_matches_exact_value_only() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("div", None, &[]));
    let x = tree.append_element(root, make_element("p", Some("x"), &["x"]));
    let _xx = tree.append_element(root, make_element("p", Some("xx"), &[]));
    let x_span = tree.append_element(root, make_element("span", Some("x"), &[]));

    assert_eq!(query(&tree, "#x", root), vec![x, x_span]);
    assert!(query(&tree, "#X", root).is_empty());
}

#[test]
fn test_empty_id_attribute() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("div", None, &[]));
    let _blank = tree.append_element(root, make_element("p", Some(""), &[]));

    // "#" is malformed and fails closed rather than matching blank ids.
    assert!(query(&tree, "#", root).is_empty());
}

#[test]
fn test_class_matches_whole_tokens() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("div", None, &[]));
    let exact = tree.append_element(root, make_element("p", None, &["red"]));
    let _prefix = tree.append_element(root, make_element("p", None, &["reddish"]));
    let many = tree.append_element(root, make_element("p", None, &["big", "red", "round"]));
    let spaced = tree.append_element(root, ElementData::new("p").with_attr("class", "  red  "));

    assert_eq!(query(&tree, ".red", root), vec![exact, many, spaced]);
    assert!(query(&tree, ".re", root).is_empty());
}

#[test]
fn test_tag_is_case_insensitive() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("DIV", None, &[]));
    let lower = tree.append_element(root, make_element("div", None, &[]));
    let _p = tree.append_element(lower, make_element("p", None, &[]));

    let expected = vec![root, lower];
    assert_eq!(query(&tree, "div", root), expected);
    assert_eq!(query(&tree, "DIV", root), expected);
    assert_eq!(query(&tree, "Div", root), expected);
}

#[test]
fn test_tag_case_folds_to_multiple_chars() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("straße", None, &[]));
    let upper = tree.append_element(root, make_element("STRASSE", None, &[]));

    assert_eq!(query(&tree, "straße", root), vec![root, upper]);
    assert_eq!(query(&tree, "strasse", root), vec![root, upper]);
    assert!(query(&tree, "strass", root).is_empty());
}

#[test]
fn test_tag_and_class_is_intersection() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("section", None, &["red"]));
    let _plain = tree.append_element(root, make_element("div", None, &[]));
    let red_div = tree.append_element(root, make_element("div", None, &["red", "x"]));
    let _red_p = tree.append_element(root, make_element("p", None, &["red"]));
    let nested = tree.append_element(red_div, make_element("DIV", None, &["red"]));

    let divs = query(&tree, "div", root);
    let reds = query(&tree, ".red", root);
    let intersection: Vec<NodeId> = divs.into_iter().filter(|id| reds.contains(id)).collect();

    assert_eq!(query(&tree, "div.red", root), intersection);
    assert_eq!(query(&tree, "div.red", root), vec![red_div, nested]);
}

// ========== combinators ==========

#[test]
fn test_direct_child_requires_immediate_parent() {
    let (tree, a, b, c) = chain();
    assert_eq!(query(&tree, "A > B", a), vec![b]);
    assert_eq!(query(&tree, "B > C", a), vec![c]);
    assert!(query(&tree, "A > C", a).is_empty());
}

#[test]
fn test_descendant_matches_any_depth() {
    let (tree, a, b, c) = chain();
    assert_eq!(query(&tree, "A C", a), vec![c]);
    assert_eq!(query(&tree, "A B", a), vec![b]);
    assert!(query(&tree, "C A", a).is_empty());
    // Strict ancestors only: a node is not its own ancestor.
    assert!(query(&tree, "A A", a).is_empty());
}

#[test]
fn test_combinators_look_above_query_root() {
    let (tree, _a, b, c) = chain();
    assert_eq!(query(&tree, "A > B", b), vec![b]);
    assert_eq!(query(&tree, "A C", c), vec![c]);
}

#[test]
fn test_top_level_element_has_no_matching_parent() {
    let (tree, a, _b, _c) = chain();
    // The parent of A is the Document node, which is not an element.
    assert!(query(&tree, "A", NodeId::ROOT).contains(&a));
    assert!(!query(&tree, "html > A", NodeId::ROOT).contains(&a));
    assert!(query(&tree, "B A", NodeId::ROOT).is_empty());
}

#[test]
fn test_detached_node_has_no_parent() {
    let mut tree = DomTree::new();
    let orphan = tree.alloc(NodeType::Element(make_element("p", None, &[])));
    assert_eq!(query(&tree, "p", orphan), vec![orphan]);
    assert!(query(&tree, "div > p", orphan).is_empty());
    assert!(query(&tree, "div p", orphan).is_empty());
}

#[test]
fn test_compound_operands() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, make_element("html", None, &[]));
    let menu = tree.append_element(html, make_element("ul", Some("menu"), &["nav"]));
    let first = tree.append_element(menu, make_element("li", None, &["active"]));
    let _second = tree.append_element(menu, make_element("li", None, &[]));
    let link = tree.append_element(first, make_element("a", None, &["active"]));

    assert_eq!(query(&tree, "ul.nav > li", html).len(), 2);
    assert_eq!(query(&tree, "ul.nav > li.active", html), vec![first]);
    assert_eq!(query(&tree, "#menu .active", html), vec![first, link]);
    assert_eq!(query(&tree, ".nav > .active", html), vec![first]);
}

// ========== traversal ==========

#[test]
fn test_moved_node_is_collected_once_under_new_parent() {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, make_element("html", None, &[]));
    let ul = tree.append_element(html, make_element("ul", None, &[]));
    let ol = tree.append_element(html, make_element("ol", None, &[]));
    let li = tree.append_element(ul, make_element("li", None, &[]));

    tree.append_child(ol, li);

    assert_eq!(query(&tree, "li", html), vec![li]);
    assert!(query(&tree, "ul > li", html).is_empty());
    assert_eq!(query(&tree, "ol > li", html), vec![li]);
}

#[test]
fn test_pre_order_with_root_first() {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, make_element("item", None, &[]));
    let x = tree.append_element(root, make_element("item", None, &[]));
    let x_child = tree.append_element(x, make_element("item", None, &[]));
    let y = tree.append_element(root, make_element("item", None, &[]));

    assert_eq!(query(&tree, "item", root), vec![root, x, x_child, y]);
    assert_eq!(query(&tree, "item", x), vec![x, x_child]);
}

#[test]
fn test_collect_with_precompiled_matcher() {
    let (tree, a, b, _c) = chain();
    let matcher = compile("A B");
    assert_eq!(collect(&tree, &matcher, NodeId::ROOT), vec![b]);
    assert_eq!(collect(&tree, &matcher, a), query(&tree, "A B", a));

    let relative_to_never = Matcher::Relative {
        combinator: Combinator::Descendant,
        ancestor: Box::new(Matcher::Tag("A".to_string())),
        subject: Box::new(Matcher::Never),
    };
    assert!(collect(&tree, &relative_to_never, a).is_empty());
    assert!(collect(&tree, &Matcher::Never, NodeId::ROOT).is_empty());
}

#[test]
fn test_non_elements_never_match() {
    let tree = parse_json(
        r#"{ "tag": "div", "attrs": { "id": "x", "class": "c" }, "children": [
            { "text": "div" },
            { "comment": "div" },
            { "tag": "div" }
        ] }"#,
    )
    .unwrap();
    let root = tree.document_element().unwrap();
    let inner = tree.children(root)[2];

    assert_eq!(query(&tree, "div", NodeId::ROOT), vec![root, inner]);
    assert_eq!(query(&tree, "#x", NodeId::ROOT), vec![root]);
    assert!(!compile("div").matches(&tree, NodeId::ROOT));
}

#[test]
fn test_query_is_idempotent() {
    let p = page();
    for selector in ["div.cls", ".cls", "body div", "body > span", "html", "#a"] {
        let first = query(&p.tree, selector, p.html);
        let second = query(&p.tree, selector, p.html);
        assert_eq!(first, second, "selector {selector:?}");
    }
}

// ========== failure ==========

#[test]
fn test_no_match_returns_empty() {
    let p = page();
    assert!(query(&p.tree, "table", p.html).is_empty());
    assert!(query(&p.tree, "#missing", p.html).is_empty());
    assert!(query(&p.tree, "body > p", p.html).is_empty());
    assert!(query(&DomTree::new(), "div", NodeId::ROOT).is_empty());
}

#[test]
fn test_malformed_selectors_fail_closed() {
    let p = page();
    for selector in ["", "div.cls.more", "html > body > div", "div > ", "html body div"] {
        assert!(
            query(&p.tree, selector, p.html).is_empty(),
            "selector {selector:?}"
        );
    }
}

#[test]
fn test_unknown_root_is_empty() {
    let p = page();
    assert!(query(&p.tree, "div", NodeId(1000)).is_empty());
}

#[test]
fn test_matchers_and_trees_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Matcher>();
    assert_send_sync::<DomTree>();

    let p = page();
    let matcher = compile(".cls");
    let expected = collect(&p.tree, &matcher, p.html);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| collect(&p.tree, &matcher, p.html)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
