//! Rendering tests for fragments: condition maps, trees and expressions.

use crate::args;
use crate::error::QbError;
use crate::qb::*;
use std::collections::HashMap;

fn render<F: Fragment>(f: &F) -> (String, Vec<Value>) {
    f.render().unwrap()
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|v| Value::Int(*v)).collect()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

// ==================== Condition maps ====================

#[test]
fn test_eq() {
    let (sql, args) = render(&Eq::new().with("id", 1));
    assert_eq!(sql, "id = ?");
    assert_eq!(args, ints(&[1]));
}

#[test]
fn test_eq_borrowed_and_usize_operands() {
    let id = 5i64;
    let (sql, args) = render(&Eq::new().with("id", &id));
    assert_eq!(sql, "id = ?");
    assert_eq!(args, ints(&[5]));

    let (sql, args) = render(&Eq::new().with("n", 5usize));
    assert_eq!(sql, "n = ?");
    assert_eq!(args, vec![Value::UInt(5)]);

    let sizes: Vec<usize> = vec![1, 2];
    let (sql, args) = render(&Eq::new().with("n", &sizes));
    assert_eq!(sql, "n IN (?,?)");
    assert_eq!(args, vec![Value::UInt(1), Value::UInt(2)]);
}

#[test]
fn test_insert_in_place() {
    let mut filter = Eq::new();
    for (i, col) in ["b", "a"].into_iter().enumerate() {
        filter.insert(col, i as i64);
    }
    filter.insert("c", "x").insert("b", 7i64);
    assert_eq!(filter.len(), 3);

    let (sql, args) = render(&filter);
    assert_eq!(sql, "a = ? AND b = ? AND c = ?");
    assert_eq!(args, vec![Value::Int(1), Value::Int(7), text("x")]);
}

#[test]
fn test_eq_empty() {
    let (sql, args) = render(&Eq::new());
    assert_eq!(sql, "(1=1)");
    assert!(args.is_empty());
}

#[test]
fn test_eq_in() {
    let (sql, args) = render(&Eq::new().with("id", vec![1, 2, 3]));
    assert_eq!(sql, "id IN (?,?,?)");
    assert_eq!(args, ints(&[1, 2, 3]));
}

#[test]
fn test_not_eq() {
    let (sql, args) = render(&NotEq::new().with("id", 1));
    assert_eq!(sql, "id <> ?");
    assert_eq!(args, ints(&[1]));
}

#[test]
fn test_not_eq_in() {
    let (sql, args) = render(&NotEq::new().with("id", [1, 2, 3]));
    assert_eq!(sql, "id NOT IN (?,?,?)");
    assert_eq!(args, ints(&[1, 2, 3]));
}

#[test]
fn test_empty_list_contradiction_and_tautology() {
    let (sql, args) = render(&Eq::new().with("id", Vec::<i32>::new()));
    assert_eq!(sql, "(1=0)");
    assert!(args.is_empty());

    let (sql, args) = render(&NotEq::new().with("id", Vec::<i32>::new()));
    assert_eq!(sql, "(1=1)");
    assert!(args.is_empty());
}

#[test]
fn test_eq_bytes_is_scalar() {
    let (sql, args) = render(&Eq::new().with("id", b"test".to_vec()));
    assert_eq!(sql, "id = ?");
    assert_eq!(args, vec![Value::Bytes(b"test".to_vec())]);
}

#[test]
fn test_ordering_operators() {
    assert_eq!(render(&Lt::new().with("id", 1)).0, "id < ?");
    assert_eq!(render(&LtOrEq::new().with("id", 1)).0, "id <= ?");
    assert_eq!(render(&Gt::new().with("id", 1)).0, "id > ?");
    assert_eq!(render(&GtOrEq::new().with("id", 1)).0, "id >= ?");
}

#[test]
fn test_ordering_rejects_null_and_list() {
    let err = Lt::new().with("id", Value::Null).render().unwrap_err();
    assert!(matches!(err, QbError::NullOperand(_)));
    assert_eq!(err.to_string(), "cannot use null with less than or greater than operators");

    let err = GtOrEq::new().with("id", vec![1, 2]).render().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot use array or slice with less than or greater than operators"
    );
}

#[test]
fn test_null_values() {
    let (sql, args) = render(&NotEq::new().with("name", Value::Null));
    assert_eq!(sql, "name IS NOT NULL");
    assert!(args.is_empty());

    let (sql, args) = render(&Eq::new().with("name", Value::Null));
    assert_eq!(sql, "name IS NULL");
    assert!(args.is_empty());
}

#[test]
fn test_optional_values() {
    let none: Option<&str> = None;
    let (sql, args) = render(&Eq::new().with("name", none));
    assert_eq!(sql, "name IS NULL");
    assert!(args.is_empty());

    let (sql, args) = render(&Eq::new().with("name", Some("Name")));
    assert_eq!(sql, "name = ?");
    assert_eq!(args, vec![text("Name")]);

    let (sql, args) = render(&Eq::new().with("user_id", Some(10i64)));
    assert_eq!(sql, "user_id = ?");
    assert_eq!(args, ints(&[10]));
}

#[test]
fn test_optional_lists() {
    let ids: Option<Vec<i32>> = None;
    assert_eq!(render(&Eq::new().with("id", ids.clone())).0, "id IS NULL");
    assert_eq!(render(&NotEq::new().with("id", ids)).0, "id IS NOT NULL");

    let ids: Option<[i32; 3]> = Some([1, 2, 3]);
    let (sql, args) = render(&NotEq::new().with("id", ids));
    assert_eq!(sql, "id NOT IN (?,?,?)");
    assert_eq!(args, ints(&[1, 2, 3]));
}

#[test]
fn test_borrowed_lists() {
    let s = vec![1, 2, 3];
    let (sql, args) = render(&Eq::new().with("id", &s));
    assert_eq!(sql, "id IN (?,?,?)");
    assert_eq!(args, ints(&[1, 2, 3]));

    let a = [1, 2, 3];
    assert_eq!(render(&NotEq::new().with("id", &a)).0, "id NOT IN (?,?,?)");
}

#[test]
fn test_like_family() {
    let cases: Vec<(Box<dyn Fragment>, &str)> = vec![
        (Box::new(Like::new().with("name", "%irrel")), "name LIKE ?"),
        (Box::new(NotLike::new().with("name", "%irrel")), "name NOT LIKE ?"),
        (Box::new(ILike::new().with("name", "%irrel")), "name ILIKE ?"),
        (Box::new(NotILike::new().with("name", "%irrel")), "name NOT ILIKE ?"),
    ];
    for (fragment, expected) in cases {
        let (sql, args) = fragment.render().unwrap();
        assert_eq!(sql, expected);
        assert_eq!(args, vec![text("%irrel")]);
    }
}

#[test]
fn test_like_lower_family() {
    let cases: Vec<(Box<dyn Fragment>, &str)> = vec![
        (Box::new(LikeLower::new().with("name", "mike")), "lower(name) LIKE lower(?)"),
        (
            Box::new(LikeLowerPercentPrefix::new().with("name", "mike")),
            "lower(name) LIKE lower('%' || ?)",
        ),
        (
            Box::new(LikeLowerPercentSuffix::new().with("name", "mike")),
            "lower(name) LIKE lower(? || '%')",
        ),
        (
            Box::new(LikeLowerPercentPrefixSuffix::new().with("name", "mike")),
            "lower(name) LIKE lower('%' || ? || '%')",
        ),
        (Box::new(NotLikeLower::new().with("name", "mike")), "lower(name) NOT LIKE lower(?)"),
        (
            Box::new(NotLikeLowerPercentPrefix::new().with("name", "mike")),
            "lower(name) NOT LIKE lower('%' || ?)",
        ),
        (
            Box::new(NotLikeLowerPercentSuffix::new().with("name", "mike")),
            "lower(name) NOT LIKE lower(? || '%')",
        ),
        (
            Box::new(NotLikeLowerPercentPrefixSuffix::new().with("name", "mike")),
            "lower(name) NOT LIKE lower('%' || ? || '%')",
        ),
    ];
    for (fragment, expected) in cases {
        let (sql, args) = fragment.render().unwrap();
        assert_eq!(sql, expected);
        // the raw value is bound; wildcards live in the SQL
        assert_eq!(args, vec![text("mike")]);
    }
}

#[test]
fn test_like_rejects_null() {
    let err = Like::new().with("name", Value::Null).render().unwrap_err();
    assert_eq!(err.to_string(), "cannot use null with like operators");

    let err = LikeLower::new().with("name", vec!["a", "b"]).render().unwrap_err();
    assert_eq!(err.to_string(), "cannot use array or slice with like operators");
}

#[test]
fn test_keys_render_sorted() {
    let (sql, args) = render(&Eq::new().with("c", 3).with("a", 1).with("b", 2));
    assert_eq!(sql, "a = ? AND b = ? AND c = ?");
    assert_eq!(args, ints(&[1, 2, 3]));

    let (sql, args) = render(&Lt::from([("b", 2), ("c", 3), ("a", 1)]));
    assert_eq!(sql, "a < ? AND b < ? AND c < ?");
    assert_eq!(args, ints(&[1, 2, 3]));
}

#[test]
fn test_plain_map_renders_as_eq() {
    let mut map = HashMap::new();
    map.insert("h".to_string(), 6);
    map.insert("g".to_string(), 5);
    let (sql, args) = render(&map);
    assert_eq!(sql, "g = ? AND h = ?");
    assert_eq!(args, ints(&[5, 6]));
}

#[test]
fn test_without_empty_strings() {
    let map = Eq::new().with("a", "").with("b", "x").with("c", Value::Null);
    let kept = map.without_empty_strings();
    assert_eq!(kept.len(), 2);
    assert_eq!(render(&kept).0, "b = ? AND c IS NULL");
}

#[test]
fn test_render_is_repeatable() {
    let map = Eq::new().with("b", vec![1, 2]).with("a", "x");
    assert_eq!(render(&map), render(&map));
}

// ==================== Boolean trees ====================

#[test]
fn test_empty_trees() {
    assert_eq!(render(&And::new()), ("(1=1)".to_string(), vec![]));
    assert_eq!(render(&Or::new()), ("(1=0)".to_string(), vec![]));
}

#[test]
fn test_tree_parenthesizes() {
    let tree = And::new()
        .with(Eq::new().with("a", 1))
        .with(Expr::new("b > ?", args![2]));
    let (sql, args) = render(&tree);
    assert_eq!(sql, "(a = ? AND b > ?)");
    assert_eq!(args, ints(&[1, 2]));
}

#[test]
fn test_mixed_connectives_keep_parentheses() {
    let tree = Or::new()
        .with(Expr::new("j = ?", args![10]))
        .with(And::new().with(Eq::new().with("k", 11)).with("true"));
    let (sql, args) = render(&tree);
    assert_eq!(sql, "(j = ? OR (k = ? AND true))");
    assert_eq!(args, ints(&[10, 11]));
}

#[test]
fn test_same_connective_is_flattened() {
    let tree = And::new()
        .with("a")
        .with(And::new().with("b").with(And::new().with("c")))
        .with("d");
    assert_eq!(render(&tree).0, "(a AND b AND c AND d)");

    let tree = Or::new().with("x").with(Or::new().with("y").with("z"));
    assert_eq!(render(&tree).0, "(x OR y OR z)");
}

#[test]
fn test_tree_skips_empty_children() {
    let none: Option<Expr> = None;
    let tree = And::new().with("").with(none).with("a = 1");
    assert_eq!(render(&tree).0, "(a = 1)");

    let tree = Or::new().with("");
    assert_eq!(render(&tree).0, "(1=0)");
}

#[test]
fn test_tree_propagates_child_error() {
    let tree = And::new()
        .with("a = 1")
        .with(Gt::new().with("b", Value::Null));
    assert!(matches!(tree.render(), Err(QbError::NullOperand(_))));
}

#[test]
fn test_bool_tree_direct() {
    let mut tree = BoolTree::new(Connective::Or);
    assert!(tree.is_empty());
    tree.push("a");
    tree.push(Eq::new().with("b", 1));
    assert_eq!(tree.len(), 2);
    assert_eq!(render(&tree).0, "(a OR b = ?)");
}

// ==================== Expressions ====================

#[test]
fn test_expr_verbatim() {
    let (sql, args) = render(&Expr::new("a > ? AND b = ?", args![100, "x"]));
    assert_eq!(sql, "a > ? AND b = ?");
    assert_eq!(args, vec![Value::Int(100), text("x")]);
}

#[test]
fn test_expr_splices_fragment() {
    let inner = Eq::new().with("status", "active");
    let e = expr("x = ? OR (?)", args![1, Arg::fragment(inner)]);
    let (sql, args) = render(&e);
    assert_eq!(sql, "x = ? OR (status = ?)");
    assert_eq!(args, vec![Value::Int(1), text("active")]);
}

#[test]
fn test_expr_splices_nested_select() {
    let sub = select(["id"]).from("t").and_where(Gt::new().with("v", 5));
    let e = Expr::new("id IN (?) AND ok = ?", args![Arg::fragment(sub), true]);
    let (sql, args) = render(&e);
    assert_eq!(sql, "id IN (SELECT id FROM t WHERE v > ?) AND ok = ?");
    assert_eq!(args, vec![Value::Int(5), Value::Bool(true)]);
}

#[test]
fn test_expr_keeps_escaped_marker() {
    let e = Expr::new("data ?? 'k' AND ? AND id = ?", args![Arg::fragment("x"), 3]);
    let (sql, args) = render(&e);
    assert_eq!(sql, "data ?? 'k' AND x AND id = ?");
    assert_eq!(args, ints(&[3]));
}

#[test]
fn test_expr_leftover_fragment_is_error() {
    let e = Expr::new("a = 1", args![Arg::fragment("x")]);
    assert!(matches!(e.render(), Err(QbError::Validation(_))));
}

#[test]
fn test_concat_expr() {
    let c = ConcatExpr::new(args![
        "COALESCE(name,",
        Arg::fragment(Expr::new("CONCAT(?,' ',?)", args!["f", "l"])),
        ")",
    ]);
    let (sql, args) = render(&c);
    assert_eq!(sql, "COALESCE(name,CONCAT(?,' ',?))");
    assert_eq!(args, vec![text("f"), text("l")]);
}

#[test]
fn test_concat_expr_bad_type() {
    let c = ConcatExpr::new(args!["prefix", 123, "suffix"]);
    let err = c.render().unwrap_err();
    assert!(matches!(err, QbError::UnsupportedPart(_)));
    assert!(err.to_string().contains("123 is not"));
}

#[test]
fn test_alias() {
    let (sql, args) = render(&Alias::new(Eq::new().with("b", vec![101, 102, 103]), "b_alias"));
    assert_eq!(sql, "(b IN (?,?,?)) AS b_alias");
    assert_eq!(args, ints(&[101, 102, 103]));
}

#[test]
fn test_placeholders() {
    assert_eq!(placeholders(3), "?,?,?");
    assert_eq!(placeholders(1), "?");
    assert_eq!(placeholders(0), "");
}

#[test]
fn test_none_fragment_is_empty() {
    let none: Option<Eq> = None;
    assert_eq!(render(&none), (String::new(), vec![]));
}
