use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use lts_common::config::Config;
use lts_common::models::user::Session;
use lts_core::images::FsImageStorage;
use lts_core::storage::MemoryStore;
use lts_core::{Response, Route, Router};
use tracing::{Instrument, info_span};

use crate::terminal::{format, print};
use crate::{mprint, success};

const MAX_REDIRECTS: usize = 5;

pub async fn request(route: Route, out: Option<PathBuf>, cfg: &Config) -> anyhow::Result<()> {
    let store = MemoryStore::open(&cfg.data_path)
        .await
        .with_context(|| format!("failed to open {}", cfg.data_path.display()))?;
    let images = FsImageStorage::new(&cfg.images_dir);
    let router = Router::new(Arc::new(store), Arc::new(images));
    let session = Session::new(cfg.user.clone());

    let mut route = route;
    let mut hops = 0;
    loop {
        let span = info_span!("request", route = %route);
        let response = router
            .handle(&session, route.clone())
            .instrument(span)
            .await?;
        match response {
            Response::Redirect(next) if !cfg.no_follow && hops < MAX_REDIRECTS => {
                print::print_status(format!("{route} → {next}"));
                route = next;
                hops += 1;
            }
            response => return render(response, out, cfg).await,
        }
    }
}

async fn render(response: Response, out: Option<PathBuf>, cfg: &Config) -> anyhow::Result<()> {
    match response {
        Response::CourseList(courses) => format::course_list(&courses, cfg),
        Response::CoursePage(page) => format::course_page(&page, cfg),
        Response::Lesson(page) => format::lesson_page(&page, cfg),
        Response::Image(image) => match out {
            Some(path) => {
                tokio::fs::write(&path, &image.data)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                success!(
                    "Saved {} ({} bytes) to {}",
                    image.content_type,
                    image.data.len(),
                    path.display()
                );
            }
            None => format::image(&image, cfg),
        },
        Response::Redirect(next) => {
            mprint!();
            print::aligned_line("Redirect", next.to_string());
        }
        Response::NotFound(reason) => {
            print::header("not found", cfg.quiet);
            anyhow::bail!("404 Not Found: {reason}");
        }
        Response::BadRequest(reason) => anyhow::bail!("400 Bad Request: {reason}"),
    }
    Ok(())
}
