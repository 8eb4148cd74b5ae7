// End-to-end scenarios for the container listing heuristic, driven through
// the public parsing entry point with realistic `docker ps -a` output.

use quicknotes_tools::docker::container::{find_in_listing, ContainerState};

const REAL_HEADER: &str =
    "CONTAINER ID   IMAGE                 COMMAND                  CREATED        STATUS                    PORTS                    NAMES";

#[test]
fn running_container_is_found_with_id_and_state() {
    let listing = "NAMES STATUS\nabc123 mysql-55-for-quicknotes Up 3 hours";
    let record = find_in_listing(listing, "mysql-55-for-quicknotes").unwrap();
    assert_eq!(record.id, "abc123");
    assert_eq!(record.state, ContainerState::Running);
}

#[test]
fn exited_container_is_found_with_id_and_state() {
    let listing = "NAMES STATUS\nabc123 mysql-55-for-quicknotes Exited (0) 2 hours ago";
    let record = find_in_listing(listing, "mysql-55-for-quicknotes").unwrap();
    assert_eq!(record.id, "abc123");
    assert_eq!(record.state, ContainerState::Exited);
}

#[test]
fn header_only_listing_finds_nothing() {
    let listing = "NAMES STATUS";
    assert!(find_in_listing(listing, "mysql-55-for-quicknotes").is_none());
}

#[test]
fn realistic_docker_output_parses() {
    let listing = format!(
        "{}\n\
         6fe66725ed81   quicknotes/mysql-55   \"/entrypoint.sh mysq…\"   3 weeks ago    Up 3 hours                0.0.0.0:7200->3306/tcp   mysql-55-for-quicknotes\n\
         0a1b2c3d4e5f   redis:7               \"docker-entrypoint.s…\"   2 months ago   Exited (0) 5 days ago                              cache\n",
        REAL_HEADER
    );

    let record = find_in_listing(&listing, "mysql-55-for-quicknotes").unwrap();
    assert_eq!(record.id, "6fe66725ed81");
    assert_eq!(record.state, ContainerState::Running);

    let cache = find_in_listing(&listing, "cache").unwrap();
    assert_eq!(cache.id, "0a1b2c3d4e5f");
    assert_eq!(cache.state, ContainerState::Exited);
}

#[test]
fn name_collision_matches_first_row_by_design() {
    // "mysql-55" is a substring of both the image and the longer container
    // name; the heuristic settles for whichever row comes first.
    let listing = format!(
        "{}\n\
         aaa111   quicknotes/mysql-55   \"mysqld\"   1 day ago   Up 1 hour   0.0.0.0:7201->3306/tcp   mysql-55-other\n\
         bbb222   quicknotes/mysql-55   \"mysqld\"   1 day ago   Up 1 hour   0.0.0.0:7200->3306/tcp   mysql-55-for-quicknotes\n",
        REAL_HEADER
    );
    let record = find_in_listing(&listing, "mysql-55").unwrap();
    assert_eq!(record.id, "aaa111");
}
