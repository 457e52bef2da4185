use std::fs;
use std::path::Path;

use fs_extra::dir::CopyOptions;

/// Copies the trunk output into `static/dist` so `include_dir!` can embed it.
fn main() {
    let embed_dir = Path::new("static");
    let trunk_dist = Path::new("../frontend/dist");

    if trunk_dist.exists() {
        let _ = fs::remove_dir_all(embed_dir);
        fs::create_dir_all(embed_dir).expect("create static/");
        let options = CopyOptions::new().overwrite(true).copy_inside(true);
        fs_extra::dir::copy(trunk_dist, embed_dir, &options).expect("copy frontend/dist");
    } else {
        println!("cargo:warning=frontend/dist missing; run `trunk build` in frontend/ to embed the console");
    }
    // The macro needs the directory even before the first trunk build.
    fs::create_dir_all(embed_dir.join("dist")).expect("create static/dist");
    println!("cargo:rerun-if-changed=../frontend/dist");
}
