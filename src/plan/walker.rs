// src/plan/walker.rs

use crate::plan::PlanNode;

/// Collapses doubled separators and strips leading/trailing ones.
/// Idempotent: normalizing a normalized path returns it unchanged.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// Depth-first, pre-order traversal in insertion order. Invokes `on_file`
/// once per file leaf with its normalized path and description. Directories
/// produce no callback and no side effect of their own.
pub fn walk<F>(root: &PlanNode, on_file: &mut F)
where
    F: FnMut(&str, &str),
{
    walk_inner(root, "", on_file);
}

fn walk_inner<F>(node: &PlanNode, prefix: &str, on_file: &mut F)
where
    F: FnMut(&str, &str),
{
    let PlanNode::Directory { children } = node else {
        return;
    };
    for (name, child) in children {
        let joined = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let path = normalize(&joined);
        match child {
            PlanNode::Directory { .. } => {
                log::debug!("directory: {path}/");
                walk_inner(child, &path, on_file);
            }
            PlanNode::File { description } => {
                log::debug!("file: {path}");
                on_file(&path, description);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(root: &PlanNode) -> Vec<(String, String)> {
        let mut seen = Vec::new();
        walk(root, &mut |path, description| {
            seen.push((path.to_string(), description.to_string()));
        });
        seen
    }

    #[test]
    fn visits_each_leaf_once_in_order() {
        let plan = PlanNode::from_json(
            r#"{"app/": {"main.py": "entry point", "README.md": "usage doc"}}"#,
        )
        .unwrap();
        let seen = collect(&plan);
        assert_eq!(
            seen,
            vec![
                ("app/main.py".to_string(), "entry point".to_string()),
                ("app/README.md".to_string(), "usage doc".to_string()),
            ]
        );
        assert_eq!(seen.len(), plan.file_count());
    }

    #[test]
    fn nested_directories_join_root_to_leaf() {
        let plan = PlanNode::from_json(
            r#"{"a/": {"b/": {"c.txt": "deep"}, "d.txt": "shallow"}, "e.txt": "top"}"#,
        )
        .unwrap();
        let paths: Vec<String> = collect(&plan).into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, ["a/b/c.txt", "a/d.txt", "e.txt"]);
    }

    #[test]
    fn empty_root_yields_no_calls() {
        let plan = PlanNode::from_json("{}").unwrap();
        assert!(collect(&plan).is_empty());
    }

    #[test]
    fn empty_directory_yields_no_calls() {
        let plan = PlanNode::from_json(r#"{"empty/": {}}"#).unwrap();
        assert!(collect(&plan).is_empty());
    }

    #[test]
    fn keys_containing_path_segments_are_flattened() {
        // A file key may itself be a path fragment.
        let plan = PlanNode::from_json(r#"{"app/": {"src/main.rs": "entry"}}"#).unwrap();
        let paths: Vec<String> = collect(&plan).into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, ["app/src/main.rs"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["a/b/c.txt", "a//b", "/a/b/", "a", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_strips_doubled_and_leading_separators() {
        assert_eq!(normalize("a//b///c.txt"), "a/b/c.txt");
        assert_eq!(normalize("/a/b.txt"), "a/b.txt");
        assert_eq!(normalize("dir/"), "dir");
    }
}
