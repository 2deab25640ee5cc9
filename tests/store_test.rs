use std::fs;
use std::path::Path;

use content_store::content::{ContentError, ListFilter, MetadataIssue, SharingLink};
use content_store::ContentStore;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn blog() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "content.yml",
        r#"
title: Tech Notes
timezone: Europe/Lisbon
ignore_files:
  - "\\.bak\\.md$"
display:
  show_breadcrumbs: true
"#,
    );

    write(
        root,
        "content/about.md",
        r#"---
title: "About"
date: 2023-09-01
showAuthor: false
sharingLinks: [email]
---

Java developer writing about Quarkus and Kubernetes.
"#,
    );

    write(
        root,
        "content/posts/quarkus-k8s/index.md",
        r#"---
title: "Deploying a Quarkus app on Kubernetes"
date: 2025-01-20T18:00:00Z
draft: false
tags: ["quarkus", "kubernetes", "java"]
categories: ["tutorials"]
summary: "From mvn package to a running pod."
showTableOfContents: true
sharingLinks: [linkedin, reddit, bluesky, email]
---

## Build the image

```shell
./mvnw package -Dquarkus.container-image.build=true
```
"#,
    );

    write(
        root,
        "content/posts/python-scripts.md",
        r#"+++
title = "Small Python scripts for the cluster"
date = 2025-03-02T09:30:00+01:00
tags = ["python", "kubernetes"]
categories = ["tutorials"]
+++

```python
print("hello")
```
"#,
    );

    write(
        root,
        "content/posts/next-steps.md",
        "---\ntitle: Next steps\ndate: 2025-06-01\ndraft: true\ntags: [kubernetes]\n---\nTBD\n",
    );

    // missing date
    write(
        root,
        "content/posts/broken.md",
        "---\ntitle: Broken\ntags: [kubernetes]\n---\nNo date.\n",
    );

    // same path as the quarkus-k8s bundle
    write(
        root,
        "content/posts/quarkus-k8s.md",
        "---\ntitle: Quarkus (old copy)\ndate: 2020-01-01\n---\nOld.\n",
    );

    write(
        root,
        "content/posts/old.bak.md",
        "---\ntitle: Backup\ndate: 2020-01-01\n---\n",
    );
    write(root, "content/posts/quarkus-k8s/diagram.png", "not markdown");

    dir
}

#[test]
fn test_load_blog() {
    let dir = blog();
    let store = ContentStore::new(dir.path()).unwrap();
    let loaded = store.load().unwrap();

    let mut paths: Vec<_> = loaded.documents.iter().map(|d| d.path.as_str()).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "about",
            "posts/next-steps",
            "posts/python-scripts",
            "posts/quarkus-k8s"
        ]
    );

    let malformed: Vec<_> = loaded.errors.iter().filter(|e| e.is_malformed()).collect();
    assert_eq!(malformed.len(), 1);
    assert_eq!(
        *malformed[0],
        ContentError::malformed("posts/broken", MetadataIssue::MissingField("date"))
    );

    let duplicates: Vec<_> = loaded.errors.iter().filter(|e| e.is_duplicate()).collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].path(), "posts/quarkus-k8s");
    assert_eq!(loaded.errors.len(), 2);

    // the bundle directory sorts before quarkus-k8s.md, so it is the one kept
    assert_eq!(
        loaded.documents.get("posts/quarkus-k8s").unwrap().title,
        "Deploying a Quarkus app on Kubernetes"
    );
}

#[test]
fn test_published_listing() {
    let dir = blog();
    let store = ContentStore::new(dir.path()).unwrap();
    let documents = store.load().unwrap().documents;

    let listed: Vec<_> = documents
        .list_published(&ListFilter::new())
        .iter()
        .map(|d| d.path.clone())
        .collect();
    assert_eq!(
        listed,
        vec!["posts/python-scripts", "posts/quarkus-k8s", "about"]
    );

    let kubernetes: Vec<_> = documents
        .list_published(&ListFilter::new().tag("Kubernetes"))
        .iter()
        .map(|d| d.path.clone())
        .collect();
    assert_eq!(kubernetes, vec!["posts/python-scripts", "posts/quarkus-k8s"]);

    let draft = documents.get("posts/next-steps").unwrap();
    assert!(draft.draft);
}

#[test]
fn test_display_and_dates_follow_config() {
    let dir = blog();
    let store = ContentStore::new(dir.path()).unwrap();
    let documents = store.load().unwrap().documents;

    let about = documents.get("about").unwrap();
    // naive date in Europe/Lisbon, which is on UTC+1 in September
    assert_eq!(about.date.to_rfc3339(), "2023-09-01T00:00:00+01:00");
    assert_eq!(about.sharing_links, vec![SharingLink::Email]);

    let display = about.display(&store.config.display);
    assert!(!display.show_author);
    assert!(display.show_breadcrumbs);
    assert!(!display.show_table_of_contents);

    let post = documents.get("posts/quarkus-k8s").unwrap();
    assert!(post.display(&store.config.display).show_table_of_contents);
    assert_eq!(post.summary_text(10), "From mvn package to a running pod.");
}

#[test]
fn test_round_trip_through_disk() {
    let dir = blog();
    let store = ContentStore::new(dir.path()).unwrap();
    let documents = store.load().unwrap().documents;

    let original = documents.get("posts/python-scripts").unwrap();
    write(
        dir.path(),
        "content/posts/python-scripts.md",
        &original.to_source().unwrap(),
    );

    let reloaded = store.load().unwrap().documents;
    assert_eq!(reloaded.get("posts/python-scripts").unwrap(), original);
}

#[test]
fn test_missing_content_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContentStore::new(dir.path()).unwrap();
    let loaded = store.load().unwrap();
    assert!(loaded.documents.is_empty());
    assert!(loaded.errors.is_empty());
}
