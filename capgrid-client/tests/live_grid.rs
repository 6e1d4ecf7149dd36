//! Tests against a running grid
//!
//! Needs a gateway and a prepared read-only fixture directory:
//!
//! ```text
//! CAPGRID_TEST_URL=http://127.0.0.1:3456 \
//! CAPGRID_TEST_RO_CAP=URI:DIR2-RO:... \
//! cargo test --test live_grid -p capgrid-client -- --ignored
//! ```
//!
//! The fixture directory holds `empty/`, `non-empty/` (files `0` to `9`),
//! `immutable-file`, `mutable-file` (131072 bytes each) and
//! `delete-testfile`. Write tests only touch a fresh root they create.

use capgrid_client::{Directory, GridError, GridNode, ServerEndpoint};
use rand::RngCore;
use sha2::{Digest, Sha256};

const IMMUTABLE_SHA256: &str = "64ea8195f0228f2944e83843a75c81f9a2bda06715cf2e20b31ff9a43257a5d2";
const MUTABLE_SHA256: &str = "b08d227c299c5d2567ed2ce6952a8aaac9373f73b5a1de87a371d9bd83fa0a2b";
const FIXTURE_SIZE: u64 = 131072;

struct LiveGrid {
    endpoint: ServerEndpoint,
    ro_cap: Option<String>,
}

fn live_grid() -> Option<LiveGrid> {
    let url = match std::env::var("CAPGRID_TEST_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("CAPGRID_TEST_URL not set, skipping");
            return None;
        }
    };
    Some(LiveGrid {
        endpoint: ServerEndpoint::new(&url).unwrap(),
        ro_cap: std::env::var("CAPGRID_TEST_RO_CAP").ok(),
    })
}

async fn fixtures() -> Option<Directory> {
    let grid = live_grid()?;
    let Some(cap) = grid.ro_cap else {
        eprintln!("CAPGRID_TEST_RO_CAP not set, skipping");
        return None;
    };
    Some(Directory::open(&grid.endpoint, &cap).await.unwrap())
}

async fn scratch_root() -> Option<Directory> {
    let grid = live_grid()?;
    Some(Directory::create(&grid.endpoint).await.unwrap())
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut data);
    data
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

// ===== Read-only fixtures =====

#[tokio::test]
#[ignore]
async fn live_fixture_directory_is_read_only() {
    let Some(root) = fixtures().await else { return };
    assert!(root.is_readable());
    assert!(!root.is_writeable());
    assert!(root.is_mutable());
}

#[tokio::test]
#[ignore]
async fn live_list_fixtures() {
    let Some(root) = fixtures().await else { return };

    assert!(root.list_directory("empty").await.unwrap().is_empty());

    let mut names = root.list_directory("/non-empty").await.unwrap();
    names.sort();
    let expected: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
#[ignore]
async fn live_read_fixture_files() {
    let Some(root) = fixtures().await else { return };

    let immutable = root.get_file("immutable-file").await.unwrap();
    assert_eq!(sha256_hex(&immutable), IMMUTABLE_SHA256);
    assert_eq!(root.get_file_size("immutable-file").await.unwrap(), FIXTURE_SIZE);

    let mutable = root.get_file("mutable-file").await.unwrap();
    assert_eq!(sha256_hex(&mutable), MUTABLE_SHA256);
    assert_eq!(root.get_file_size("mutable-file").await.unwrap(), FIXTURE_SIZE);
}

#[tokio::test]
#[ignore]
async fn live_missing_paths() {
    let Some(root) = fixtures().await else { return };

    assert!(root.get_file("somefile").await.unwrap_err().is_not_found());
    assert!(!root.exists("somefile").await.unwrap());
    assert!(root
        .list_paths_starting_with("/no-such-dir/x")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[ignore]
async fn live_mutations_are_refused() {
    let Some(root) = fixtures().await else { return };

    for result in [
        root.mkdir("mkdir-testdir").await.map(|_| ()),
        root.put_file("put-testfile", "data", false).await.map(|_| ()),
        root.delete("delete-testfile").await,
    ] {
        assert!(matches!(result, Err(GridError::ReadOnly(_))));
    }
    assert!(root.exists("delete-testfile").await.unwrap());
    assert!(!root.exists("mkdir-testdir").await.unwrap());
}

// ===== Writes on a fresh root =====

#[tokio::test]
#[ignore]
async fn live_put_and_get() {
    let Some(root) = scratch_root().await else { return };
    let data = random_bytes(4096);

    root.put_file("random.bin", data.clone(), false).await.unwrap();
    assert_eq!(root.get_file("random.bin").await.unwrap(), data);
    assert_eq!(root.get_file_size("random.bin").await.unwrap(), 4096);

    root.put_file("mutable.bin", data.clone(), true).await.unwrap();
    assert_eq!(root.get_file("mutable.bin").await.unwrap(), data);
}

#[tokio::test]
#[ignore]
async fn live_mkdir_and_list() {
    let Some(root) = scratch_root().await else { return };

    root.mkdir("test_directory/").await.unwrap();
    assert!(root.exists("test_directory").await.unwrap());
    assert!(root.list_directory("test_directory").await.unwrap().is_empty());
    assert!(root.mkdir("test_directory").await.unwrap_err().is_already_exists());

    for dir in ["mydir1", "mydir2", "mydir3", "another directory"] {
        root.mkdir(&format!("test_directory/{}", dir)).await.unwrap();
    }
    root.put_file("test_directory/mydir2/a.txt", "a", false).await.unwrap();
    root.put_file("test_directory/mydir2/b.txt", "b", false).await.unwrap();
    root.put_file("test_directory/myfile.txt", "leroy was here", false)
        .await
        .unwrap();

    let mut listed = root.list_directory("test_directory/").await.unwrap();
    listed.sort();
    assert_eq!(
        listed,
        vec!["another directory/", "mydir1/", "mydir2/", "mydir3/", "myfile.txt"]
    );

    let err = root.list_directory("test_directory/myfile.txt").await.unwrap_err();
    assert!(err.is_type_mismatch());

    let mut found = root
        .list_paths_starting_with("test_directory/my")
        .await
        .unwrap();
    found.sort();
    assert_eq!(
        found,
        vec![
            "test_directory/mydir1/",
            "test_directory/mydir2/",
            "test_directory/mydir2/a.txt",
            "test_directory/mydir2/b.txt",
            "test_directory/mydir3/",
            "test_directory/myfile.txt",
        ]
    );
}

#[tokio::test]
#[ignore]
async fn live_delete() {
    let Some(root) = scratch_root().await else { return };

    root.mkdir("d").await.unwrap();
    root.mkdir("d/sub").await.unwrap();
    root.put_file("d/sub/file1.txt", "x", false).await.unwrap();
    root.put_file("d/file2.txt", "y", false).await.unwrap();

    root.delete("d/sub/").await.unwrap();
    assert_eq!(root.list_directory("d").await.unwrap(), vec!["file2.txt"]);
    assert!(root.get_file("d/sub/file1.txt").await.unwrap_err().is_not_found());
    assert!(root.delete("d/sub").await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore]
async fn live_rename() {
    let Some(root) = scratch_root().await else { return };
    let data = random_bytes(1024);

    root.mkdir("r").await.unwrap();
    root.mkdir("r/subdir1").await.unwrap();
    root.put_file("r/file1.txt", data.clone(), false).await.unwrap();

    root.rename("r/file1.txt", "r/subdir1/file1.txt").await.unwrap();
    assert!(!root.exists("r/file1.txt").await.unwrap());
    assert_eq!(root.get_file("r/subdir1/file1.txt").await.unwrap(), data);

    root.rename("r/subdir1/", "r/subdir2/").await.unwrap();
    assert_eq!(
        root.list_directory("r/subdir2").await.unwrap(),
        vec!["file1.txt"]
    );

    let err = root.rename("r", "r/subdir2/newdir").await.unwrap_err();
    assert!(matches!(err, GridError::InvalidArgument(_)));
}
