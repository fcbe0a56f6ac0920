use chrono::{DateTime, Utc};
use leptos::*;

use crate::api::use_services;
use crate::icons::Icon;
use crate::models::{Activity, ActivityDraft, ActivityStatus, DepartmentStat};
use crate::state::use_toast;

use super::quick_action::QuickAction;

const FEED_PAGE_SIZE: u32 = 10;

/// Human-friendly age of a feed entry.
pub(crate) fn relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(time);
    let minutes = elapsed.num_minutes();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else if elapsed.num_hours() < 24 {
        let hours = elapsed.num_hours();
        format!("{hours} hour{} ago", plural(hours))
    } else if elapsed.num_days() < 7 {
        let days = elapsed.num_days();
        format!("{days} day{} ago", plural(days))
    } else {
        time.format("%b %-d, %Y").to_string()
    }
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn status_badge_class(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Pending => "badge badge-warning",
        ActivityStatus::Completed => "badge badge-success",
        ActivityStatus::Critical => "badge badge-danger",
    }
}

/// Dashboard page: department statistics, the quick-action card and the
/// activity feed.
#[component]
pub fn Home() -> impl IntoView {
    let services = use_services();
    let toast = use_toast();

    let stats_service = services.stats.clone();
    let stats = create_local_resource(
        || (),
        move |_| {
            let service = stats_service.clone();
            async move { service.list().await }
        },
    );

    let (feed_trigger, set_feed_trigger) = create_signal(0u32);
    let feed_service = services.activities.clone();
    let feed = create_local_resource(
        move || feed_trigger.get(),
        move |_| {
            let service = feed_service.clone();
            async move { service.list(&[], 1, FEED_PAGE_SIZE).await }
        },
    );

    // The quick-action card reports each recorded activity upward; refetch
    // the feed so the new entry shows at the top.
    let on_recorded = Callback::new(move |draft: ActivityDraft| {
        toast.success(format!("Activity for {} recorded successfully!", draft.user));
        set_feed_trigger.update(|n| *n += 1);
    });

    view! {
        <div class="page home-page">
            <header class="page-header">
                <h1>"Dashboard"</h1>
                <p>"Welcome to StaffSphere, your workforce management solution"</p>
            </header>

            <Suspense fallback=|| view! { <StatsPlaceholder /> }>
                {move || {
                    stats.get().map(|result| match result {
                        Ok(stats) => view! { <StatsGrid stats=stats /> }.into_view(),
                        Err(err) => {
                            log::error!("Failed to load department stats: {err}");
                            view! {
                                <div class="banner banner-error">
                                    "Department statistics are unavailable right now."
                                </div>
                            }
                            .into_view()
                        }
                    })
                }}
            </Suspense>

            <div class="home-grid">
                <div class="home-main">
                    <QuickAction on_recorded=on_recorded />
                </div>

                <div class="card feed-card">
                    <div class="feed-header">
                        <h2 class="card-title">"Recent Activities"</h2>
                    </div>
                    <Suspense fallback=|| view! { <div class="loading">"Loading activities..."</div> }>
                        {move || {
                            feed.get().map(|result| match result {
                                Ok(activities) if activities.is_empty() => view! {
                                    <div class="empty-state">
                                        <p>"No activity recorded yet."</p>
                                    </div>
                                }
                                .into_view(),
                                Ok(activities) => view! { <ActivityFeed activities=activities /> }
                                    .into_view(),
                                Err(err) => {
                                    log::error!("Failed to load activity feed: {err}");
                                    view! {
                                        <div class="banner banner-error">
                                            "The activity feed is unavailable right now."
                                        </div>
                                    }
                                    .into_view()
                                }
                            })
                        }}
                    </Suspense>
                </div>
            </div>
        </div>
    }
}

/// Department statistic cards.
#[component]
fn StatsGrid(stats: Vec<DepartmentStat>) -> impl IntoView {
    view! {
        <div class="stats-grid">
            {stats
                .into_iter()
                .map(|stat| {
                    view! {
                        <div class="card stat-card">
                            <div class="stat-card-body">
                                <div>
                                    <h3 class="stat-title">{stat.title}</h3>
                                    <div class="stat-value">{stat.value}</div>
                                    <div class="stat-increase">{stat.increase}</div>
                                </div>
                                <div class=format!("stat-icon {}", stat.color)>
                                    <Icon name=stat.icon size=20 />
                                </div>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Pulsing placeholders while statistics load.
#[component]
fn StatsPlaceholder() -> impl IntoView {
    view! {
        <div class="stats-grid placeholder">
            {(0..4)
                .map(|_| view! { <div class="card stat-card skeleton"></div> })
                .collect_view()}
        </div>
    }
}

/// Newest-first feed entries.
#[component]
fn ActivityFeed(activities: Vec<Activity>) -> impl IntoView {
    let now = Utc::now();

    view! {
        <div class="feed-list">
            {activities
                .into_iter()
                .map(|activity| {
                    view! {
                        <div class="feed-item">
                            <div class=format!("feed-icon feed-icon-{}", activity.status.as_str())>
                                <Icon name=activity.status.icon() size=16 />
                            </div>
                            <div class="feed-body">
                                <div class="feed-item-header">
                                    <span class="feed-user">{activity.user}</span>
                                    <span class=status_badge_class(activity.status)>
                                        {activity.status.as_str()}
                                    </span>
                                </div>
                                <p class="feed-action">{activity.action}</p>
                                <p class="feed-time">{relative_time(activity.time, now)}</p>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn test_relative_time_falls_back_to_date() {
        let now = Utc::now();
        let old = now - Duration::days(30);
        let formatted = relative_time(old, now);
        assert!(formatted.contains(','), "expected an absolute date, got {formatted}");
    }
}
