//! Route table types and the matching used by the server view's route switch.
//!
//! Paths in a [`RouteDescriptor`] are relative to the server's base URL
//! (`/server/{id}`) and support three kinds of segment: static text, a named
//! parameter (`:id`) and a parameter restricted to alternatives
//! (`:action(edit|new)`).

/// One entry of the static server route table.
///
/// `C` is whatever the UI layer uses to build the view for the route; the
/// matching logic never looks at it.
#[derive(Debug, Clone)]
pub struct RouteDescriptor<C> {
    pub path: &'static str,
    /// Routes without a name are reachable but never listed in the sidebar.
    pub name: Option<&'static str>,
    pub permission: Option<&'static [&'static str]>,
    pub egg_ids: Option<&'static [u32]>,
    pub icon: &'static str,
    pub exact: bool,
    pub component: C,
}

impl<C> RouteDescriptor<C> {
    pub fn display_name(&self) -> Option<&'static str> {
        self.name.filter(|name| !name.is_empty())
    }

    pub fn available_for_egg(&self, egg_id: u32) -> bool {
        self.egg_ids.is_none_or(|ids| ids.contains(&egg_id))
    }
}

/// Joins a relative route path onto a base path. `"/"` is the base itself.
pub fn join_route(base: &str, value: &str) -> String {
    if value == "/" {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        value.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Static(&'a str),
    Param {
        name: &'a str,
        choices: Option<Vec<&'a str>>,
    },
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Self {
        let Some(param) = raw.strip_prefix(':') else {
            return Segment::Static(raw);
        };
        match param.split_once('(') {
            Some((name, rest)) => Segment::Param {
                name,
                choices: Some(rest.trim_end_matches(')').split('|').collect()),
            },
            None => Segment::Param { name: param, choices: None },
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            Segment::Static(text) => text.eq_ignore_ascii_case(value),
            Segment::Param { choices: None, .. } => !value.is_empty(),
            Segment::Param { choices: Some(choices), .. } => choices.contains(&value),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Parameters captured while matching, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Exact match of `relative` (the URL suffix below the base) against a
/// route pattern. A trailing slash is ignored.
pub fn match_pattern(pattern: &str, relative: &str) -> Option<RouteParams> {
    let pattern: Vec<Segment> = segments(pattern).map(Segment::parse).collect();
    let values: Vec<&str> = segments(relative).collect();
    if pattern.len() != values.len() {
        return None;
    }
    let mut params = RouteParams::default();
    for (segment, value) in pattern.iter().zip(values) {
        if !segment.accepts(value) {
            return None;
        }
        if let Segment::Param { name, .. } = segment {
            params.0.push((name.to_string(), value.to_string()));
        }
    }
    Some(params)
}

/// The part of `pathname` below `base`, or `None` when `pathname` is not
/// under `base` at all.
pub fn relative_path<'a>(base: &str, pathname: &'a str) -> Option<&'a str> {
    let rest = pathname.strip_prefix(base.trim_end_matches('/'))?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

#[derive(Debug)]
pub enum RouteMatch<'a, C> {
    Matched {
        route: &'a RouteDescriptor<C>,
        params: RouteParams,
    },
    NotFound,
}

/// First route in table order whose pattern matches the current path.
pub fn match_route<'a, C>(
    table: &'a [RouteDescriptor<C>],
    base: &str,
    pathname: &str,
) -> RouteMatch<'a, C> {
    let Some(relative) = relative_path(base, pathname) else {
        return RouteMatch::NotFound;
    };
    table
        .iter()
        .find_map(|route| {
            match_pattern(route.path, relative).map(|params| RouteMatch::Matched { route, params })
        })
        .unwrap_or(RouteMatch::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &'static str, name: Option<&'static str>) -> RouteDescriptor<&'static str> {
        RouteDescriptor {
            path,
            name,
            permission: None,
            egg_ids: None,
            icon: "",
            exact: true,
            component: path,
        }
    }

    fn table() -> Vec<RouteDescriptor<&'static str>> {
        vec![
            route("/", Some("Console")),
            route("/files", Some("Files")),
            route("/files/:action(edit|new)", None),
            route("/schedules", Some("Schedules")),
            route("/schedules/:id", None),
        ]
    }

    fn matched(pathname: &str) -> Option<&'static str> {
        let table = table();
        match match_route(&table, "/server/1a7ce997", pathname) {
            RouteMatch::Matched { route, .. } => Some(route.component),
            RouteMatch::NotFound => None,
        }
    }

    #[test]
    fn joins_paths() {
        assert_eq!(join_route("/server/abc", "/"), "/server/abc");
        assert_eq!(join_route("/server/abc/", "//files"), "/server/abc/files");
        assert_eq!(join_route("/server/:id", "files/:action(edit|new)"), "/server/:id/files/:action(edit|new)");
    }

    #[test]
    fn matches_exact_routes() {
        assert_eq!(matched("/server/1a7ce997"), Some("/"));
        assert_eq!(matched("/server/1a7ce997/"), Some("/"));
        assert_eq!(matched("/server/1a7ce997/files"), Some("/files"));
        assert_eq!(matched("/server/1a7ce997/files/edit"), Some("/files/:action(edit|new)"));
        assert_eq!(matched("/server/1a7ce997/schedules/4"), Some("/schedules/:id"));
    }

    #[test]
    fn unmatched_paths_fall_through() {
        assert_eq!(matched("/server/1a7ce997/files/delete"), None);
        assert_eq!(matched("/server/1a7ce997/nope"), None);
        assert_eq!(matched("/server/1a7ce9978/files"), None);
        assert_eq!(matched("/account"), None);
    }

    #[test]
    fn captures_params() {
        let params = match_pattern("/files/:action(edit|new)", "/files/new").unwrap();
        assert_eq!(params.get("action"), Some("new"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn egg_allowlist() {
        let mut r = route("/plugins", Some("Plugins"));
        assert!(r.available_for_egg(9));
        r.egg_ids = Some(&[1, 2]);
        assert!(r.available_for_egg(2));
        assert!(!r.available_for_egg(9));
    }
}
