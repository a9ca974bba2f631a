use leptos::prelude::*;
use shared::models::Subuser;

use super::{PageTitle, ResourceList, load_list, style};

#[component]
pub fn UsersPage() -> impl IntoView {
    let loaded = load_list::<Subuser>("users");

    view! {
        <PageTitle title="Users" />
        <ResourceList
            loaded=loaded
            empty="It looks like you don't have any subusers."
            row=|user: Subuser| {
                view! {
                    <span>
                        {user.username.clone()}
                        " "
                        <span class=style::muted>{user.email.clone()}</span>
                    </span>
                    <span class=style::badge>
                        {format!("{} permissions", user.permissions.len())}
                    </span>
                }
            }
        />
    }
}
