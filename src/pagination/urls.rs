/// Build a `/page/{n}` style URL, the only paging scheme the federation API uses
pub fn build_page_path(base_url: &str, page: usize) -> String {
    format!("{}/page/{}", trim_trailing_slash(base_url), page)
}

fn trim_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}
