use contracts::system::users::{FieldError, UpdateProfileDto, UserProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::{api, PAGE_ID};
use crate::shared::api_utils::abort_on_cleanup;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};

fn message_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[component]
fn ProfileField(
    label: &'static str,
    field: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<Vec<FieldError>>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let error = Memo::new(move |_| errors.with(|e| message_for(e, field)));

    view! {
        <div class="form-group" class:form-group--invalid=move || error.with(Option::is_some)>
            <label for=field>{label}</label>
            <input
                id=field
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    errors.update(|e| e.retain(|x| x.field != field));
                }
                disabled=move || disabled.get()
            />
            {move || error.get().map(|m| view! { <div class="field-error">{m}</div> })}
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let abort = StoredValue::new_local(abort_on_cleanup());

    let profile = RwSignal::new(None::<UserProfile>);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let load_error = RwSignal::new(None::<String>);
    let status = RwSignal::new(None::<Result<String, String>>);
    let is_loading = RwSignal::new(false);
    let is_saving = RwSignal::new(false);

    let fill = move |p: &UserProfile| {
        let dto = UpdateProfileDto::from_profile(p);
        full_name.set(dto.full_name);
        email.set(dto.email);
        phone.set(dto.phone);
    };

    Effect::new(move |_| {
        is_loading.set(true);
        let signal = abort.get_value();
        spawn_local(async move {
            match api::fetch_profile(signal).await {
                Ok(p) => {
                    fill(&p);
                    profile.set(Some(p));
                }
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::warn!("{}: {}", PAGE_ID, e);
                    load_error.set(Some(e.to_string()));
                }
            }
            is_loading.set(false);
        });
    });

    let save = move || {
        if is_saving.get_untracked() {
            return;
        }
        status.set(None);
        let dto = UpdateProfileDto {
            full_name: full_name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
        };
        if let Err(found) = dto.validate() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());
        is_saving.set(true);
        spawn_local(async move {
            match api::update_profile(dto).await {
                Ok(updated) => {
                    fill(&updated);
                    profile.set(Some(updated));
                    status.set(Some(Ok("Profile updated".to_string())));
                }
                Err(e) => {
                    log::warn!("{}: {}", PAGE_ID, e);
                    status.set(Some(Err(e.to_string())));
                }
            }
            is_saving.set(false);
        });
    };

    let reset = move || {
        if let Some(p) = profile.get_untracked() {
            fill(&p);
        }
        errors.set(Vec::new());
        status.set(None);
    };

    let busy = Signal::derive(move || is_saving.get() || is_loading.get());

    view! {
        <PageFrame page_id=format!("{}--{}", PAGE_ID, PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">"My Profile"</h1>
            </div>

            {move || {
                load_error
                    .get()
                    .map(|e| view! { <div class="alert alert--error">{e}</div> })
            }}

            <Show when=move || profile.with(Option::is_some)>
                <div class="profile__identity">
                    {move || profile.with(|p| {
                        p.as_ref().map(|p| {
                            let username = p.username.clone().unwrap_or_else(|| p.id.clone());
                            view! {
                                <span class="profile__username">{username}</span>
                                {p.role.clone().map(|r| view! { <Badge>{r}</Badge> })}
                            }
                        })
                    })}
                </div>

                <form
                    class="form profile__form"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        save();
                    }
                >
                    <ProfileField label="Full Name" field="full_name" value=full_name errors=errors disabled=busy />
                    <ProfileField label="Email" field="email" input_type="email" value=email errors=errors disabled=busy />
                    <ProfileField label="Phone" field="phone" input_type="tel" value=phone errors=errors disabled=busy />

                    {move || status.get().map(|s| match s {
                        Ok(m) => view! { <div class="alert alert--success">{m}</div> }.into_any(),
                        Err(m) => view! { <div class="alert alert--error">{m}</div> }.into_any(),
                    })}

                    <div class="form-actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| reset()
                            disabled=busy
                        >
                            "Reset"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| save()
                            disabled=busy
                        >
                            {move || if is_saving.get() { "Saving..." } else { "Save" }}
                        </Button>
                    </div>
                </form>
            </Show>

            <Show when=move || is_loading.get()>
                <Spinner label="Loading profile..." />
            </Show>
        </PageFrame>
    }
}
