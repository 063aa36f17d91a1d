//! Startup banner.

use crate::consts::AUTHOR;

pub struct BannerInfo<'a> {
    pub api_url: &'a str,
    pub auth_status: &'a str,
    pub db_path: &'a str,
}

pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             S O L V E R               ║
   ║   a problem in, a worked answer out   ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   api       {}
   auth      {}
   store     {}

   type the problem, then its answer. /help for commands.
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        info.api_url,
        info.auth_status,
        info.db_path,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}
