use super::{load_config, open_repository};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = load_config("list-templates", config, profile);
    let repo = open_repository("list-templates", &rc);

    let list = repo.list_all();
    if list.is_empty() {
        println!("(no templates found)");
        return;
    }
    for t in list {
        println!("{}", t.logical_name);
    }
    println!("-- {} templates --", list.len());
}
