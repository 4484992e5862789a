use catalog_async_runtime::{CatalogCommand, CatalogUpdate, WorkerEndpoints};
use catalog_core::{FileFetcher, ImageLoader, ImageTracker, LoadOutcome};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Image loading state for the open catalog
struct CatalogState {
    root: PathBuf,
    loader: ImageLoader<FileFetcher>,
    tracker: ImageTracker,
}

/// Async worker task that loads catalog images and sends updates
pub async fn worker_task(endpoints: WorkerEndpoints) {
    let WorkerEndpoints {
        mut command_rx,
        update_tx,
    } = endpoints;
    let mut state: Option<CatalogState> = None;

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut state, &mut command_rx, &update_tx).await;
    }
}

async fn process_command(
    cmd: CatalogCommand,
    state: &mut Option<CatalogState>,
    command_rx: &mut mpsc::UnboundedReceiver<CatalogCommand>,
    update_tx: &mpsc::UnboundedSender<CatalogUpdate>,
) {
    match cmd {
        CatalogCommand::LoadCatalog { root, options } => {
            let content_pages = options.book.content_pages;
            log::info!(
                "Opening catalog at {} ({} images)",
                root.display(),
                content_pages
            );
            *state = Some(CatalogState {
                loader: ImageLoader::from_options(FileFetcher::new(&root), &options),
                tracker: ImageTracker::new(content_pages),
                root,
            });
            let _ = update_tx.send(CatalogUpdate::CatalogLoaded { content_pages });
        }
        CatalogCommand::PreloadPriority { mut indices } => {
            let mut then_remaining = false;

            // Keep only the most recent priority request
            while let Ok(next_cmd) = command_rx.try_recv() {
                match next_cmd {
                    CatalogCommand::PreloadPriority { indices: newer } => {
                        log::debug!("Discarding queued preload request, using newer request");
                        indices = newer;
                    }
                    CatalogCommand::PreloadRemaining => then_remaining = true,
                    other => {
                        Box::pin(process_command(other, state, command_rx, update_tx)).await;
                    }
                }
            }

            let Some(catalog) = state.as_mut() else {
                let _ = update_tx.send(CatalogUpdate::Error {
                    message: "No catalog open".to_string(),
                });
                return;
            };
            for index in indices {
                load_image(catalog, index, update_tx).await;
            }

            if then_remaining {
                Box::pin(preload_remaining(state, command_rx, update_tx)).await;
            }
        }
        CatalogCommand::PreloadRemaining => {
            preload_remaining(state, command_rx, update_tx).await;
        }
    }
}

/// Background pass over every image not yet loaded or failed. Commands that
/// arrive in between are handled first.
async fn preload_remaining(
    state: &mut Option<CatalogState>,
    command_rx: &mut mpsc::UnboundedReceiver<CatalogCommand>,
    update_tx: &mpsc::UnboundedSender<CatalogUpdate>,
) {
    loop {
        if let Ok(next_cmd) = command_rx.try_recv() {
            Box::pin(process_command(next_cmd, state, command_rx, update_tx)).await;
            continue;
        }

        let Some(catalog) = state.as_mut() else {
            return;
        };
        let remaining = catalog.tracker.remaining();
        let Some(&index) = remaining.first() else {
            log::info!(
                "Preloaded {} images from {}",
                catalog.tracker.loaded_count(),
                catalog.root.display()
            );
            return;
        };

        let total = catalog.tracker.remaining().len() + catalog.tracker.loaded_count();
        let _ = update_tx.send(CatalogUpdate::Progress {
            operation: "Preloading images".to_string(),
            current: catalog.tracker.loaded_count(),
            total,
        });

        load_image(catalog, index, update_tx).await;
    }
}

async fn load_image(
    catalog: &mut CatalogState,
    index: u32,
    update_tx: &mpsc::UnboundedSender<CatalogUpdate>,
) {
    match catalog.loader.load(&mut catalog.tracker, index).await {
        Ok(LoadOutcome::Loaded(bytes)) => match decode(bytes).await {
            Ok((width, height, rgba_data)) => {
                let _ = update_tx.send(CatalogUpdate::ImageLoaded {
                    index,
                    width,
                    height,
                    rgba_data,
                });
            }
            Err(e) => {
                log::warn!("Failed to decode {}: {}", catalog.loader.path_for(index), e);
                catalog.tracker.mark_unusable(index);
                let _ = update_tx.send(CatalogUpdate::ImageFailed {
                    index,
                    message: format!("Failed to decode image: {}", e),
                });
            }
        },
        Ok(LoadOutcome::Skipped) => {}
        Err(e) => {
            log::warn!("{}", e);
            let _ = update_tx.send(CatalogUpdate::ImageFailed {
                index,
                message: e.to_string(),
            });
        }
    }
}

/// Decode image bytes to RGBA off the async threads
async fn decode(bytes: Vec<u8>) -> anyhow::Result<(usize, usize, Vec<u8>)> {
    let rgba = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map(|image| image.to_rgba8())
    })
    .await??;
    Ok((rgba.width() as usize, rgba.height() as usize, rgba.into_raw()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_async_runtime::channels;
    use catalog_core::{BookConfig, CatalogOptions};
    use tempfile::TempDir;

    fn write_png(path: &std::path::Path) {
        let image = image::RgbaImage::from_pixel(4, 5, image::Rgba([200, 10, 10, 255]));
        image.save(path).unwrap();
    }

    fn catalog_dir(images: &[u32]) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        for idx in images {
            write_png(&dir.path().join(format!("images/page-{:02}.png", idx)));
        }
        dir
    }

    fn options() -> CatalogOptions {
        CatalogOptions {
            book: BookConfig::new(2, 3, 2),
            image_format: "png".to_string(),
            retry_count: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_priority_then_remaining() {
        let dir = catalog_dir(&[1, 2]);
        let (mut ui, endpoints) = channels();

        ui.send(CatalogCommand::LoadCatalog {
            root: dir.path().to_path_buf(),
            options: options(),
        })
        .unwrap();
        ui.send(CatalogCommand::PreloadPriority { indices: vec![2] })
            .unwrap();
        ui.send(CatalogCommand::PreloadRemaining).unwrap();
        let worker = tokio::spawn(worker_task(endpoints));

        let mut loaded = Vec::new();
        let mut failed = Vec::new();
        while loaded.len() + failed.len() < 3 {
            match ui.update_rx.recv().await.unwrap() {
                CatalogUpdate::ImageLoaded {
                    index,
                    width,
                    height,
                    rgba_data,
                } => {
                    assert_eq!((width, height), (4, 5));
                    assert_eq!(rgba_data.len(), 4 * 5 * 4);
                    loaded.push(index);
                }
                CatalogUpdate::ImageFailed { index, .. } => failed.push(index),
                _ => {}
            }
        }

        assert_eq!(loaded, vec![2, 1]);
        assert_eq!(failed, vec![3]);
        worker.abort();
    }

    #[tokio::test]
    async fn test_newer_priority_request_wins() {
        let dir = catalog_dir(&[1, 2, 3]);
        let (mut ui, endpoints) = channels();

        ui.send(CatalogCommand::LoadCatalog {
            root: dir.path().to_path_buf(),
            options: options(),
        })
        .unwrap();
        ui.send(CatalogCommand::PreloadPriority { indices: vec![1] })
            .unwrap();
        ui.send(CatalogCommand::PreloadPriority { indices: vec![3] })
            .unwrap();
        let worker = tokio::spawn(worker_task(endpoints));

        let mut loaded = Vec::new();
        while loaded.is_empty() {
            if let CatalogUpdate::ImageLoaded { index, .. } = ui.update_rx.recv().await.unwrap() {
                loaded.push(index);
            }
        }
        assert_eq!(loaded, vec![3]);
        worker.abort();
    }

    #[tokio::test]
    async fn test_undecodable_image_is_not_counted_as_loaded() {
        let dir = catalog_dir(&[2, 3]);
        std::fs::write(dir.path().join("images/page-01.png"), b"not a png").unwrap();
        let (mut ui, endpoints) = channels();

        ui.send(CatalogCommand::LoadCatalog {
            root: dir.path().to_path_buf(),
            options: options(),
        })
        .unwrap();
        ui.send(CatalogCommand::PreloadPriority { indices: vec![1] })
            .unwrap();
        ui.send(CatalogCommand::PreloadRemaining).unwrap();
        let worker = tokio::spawn(worker_task(endpoints));

        let mut saw_failure = false;
        loop {
            match ui.update_rx.recv().await.unwrap() {
                CatalogUpdate::ImageFailed { index, message } => {
                    assert_eq!(index, 1);
                    assert!(message.contains("decode"));
                    saw_failure = true;
                }
                CatalogUpdate::Progress { current, total, .. } => {
                    assert!(saw_failure);
                    assert_eq!((current, total), (0, 2));
                    break;
                }
                _ => {}
            }
        }
        worker.abort();
    }

    #[tokio::test]
    async fn test_preload_without_catalog_reports_error() {
        let (mut ui, endpoints) = channels();
        ui.send(CatalogCommand::PreloadPriority { indices: vec![1] })
            .unwrap();
        let worker = tokio::spawn(worker_task(endpoints));

        assert!(matches!(
            ui.update_rx.recv().await.unwrap(),
            CatalogUpdate::Error { .. }
        ));
        worker.abort();
    }
}
