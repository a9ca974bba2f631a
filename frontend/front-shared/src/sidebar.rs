use crate::permissions::Permissions;
use crate::routes::{RouteDescriptor, join_route};

pub const ADMIN_LINK_NAME: &str = "Admin";
pub const ADMIN_LINK_ICON: &str = "/public/icons/external-link.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub name: &'static str,
    pub href: String,
    pub icon: &'static str,
    pub exact: bool,
    /// Opens outside the client router, in a new tab.
    pub external: bool,
}

/// Everything the sidebar needs to know about the viewer and the server.
#[derive(Debug, Clone, Copy)]
pub struct SidebarContext<'a> {
    pub base_url: &'a str,
    pub egg_id: u32,
    pub permissions: &'a Permissions,
    pub root_admin: bool,
    pub admin_url: &'a str,
}

/// Links shown in the server sidebar, in route table order.
///
/// Unnamed routes and routes restricted to other eggs are dropped; a route
/// that requires a permission is only listed when the viewer holds any of
/// the listed actions. Root admins get a trailing link to the admin area.
pub fn sidebar_links<C>(table: &[RouteDescriptor<C>], ctx: SidebarContext<'_>) -> Vec<SidebarLink> {
    let mut links: Vec<SidebarLink> = table
        .iter()
        .filter_map(|route| route.display_name().map(|name| (route, name)))
        .filter(|(route, _)| route.available_for_egg(ctx.egg_id))
        .filter(|(route, _)| {
            route
                .permission
                .is_none_or(|actions| ctx.permissions.can(actions, true))
        })
        .map(|(route, name)| SidebarLink {
            name,
            href: join_route(ctx.base_url, route.path),
            icon: route.icon,
            exact: route.exact,
            external: false,
        })
        .collect();

    if ctx.root_admin {
        links.push(SidebarLink {
            name: ADMIN_LINK_NAME,
            href: ctx.admin_url.to_string(),
            icon: ADMIN_LINK_ICON,
            exact: false,
            external: true,
        });
    }
    links
}
