use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgGroup, Args, Parser, Subcommand};
use glissemontre::Config;
use glissemontre::annotation::{AnnotationId, AnnotationKind, Geometry, Position};
use glissemontre::editor::{self, DropResult, SidebarController};
use glissemontre::export::to_geojson_string;
use glissemontre::slideshow::{ApplyOutcome, EditorStore, Slideshow};
use glissemontre::storage::{self, StorageOptions};
use glissemontre::util::parse_position;
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GLISSEMONTRE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "glissemontre")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Manage ordered slideshows of image annotations"
)]
struct Cli {
    /// Directory holding slideshow files (overrides storage.directory)
    #[arg(long, global = true, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty slideshow and print its id
    New { name: String },
    /// List stored slideshows
    List,
    /// Print the annotations of a slideshow in order
    Show { id: String },
    /// Add a shape to a slideshow
    Add(AddArgs),
    /// Change the text content of an annotation
    Edit {
        id: String,
        index: usize,
        #[arg(long)]
        content: String,
    },
    /// Remove an annotation
    Remove { id: String, index: usize },
    /// Move an annotation to another position in the list
    Move { id: String, from: usize, to: usize },
    /// Change the slideshow title
    Rename { id: String, name: String },
    /// Write the slideshow as a GeoJSON FeatureCollection
    Export {
        id: String,
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Draw the slideshow's shapes into a PNG preview
    #[cfg(feature = "render")]
    Render {
        id: String,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 600)]
        height: u32,
    },
    /// Copy a slideshow under a new id and print that id
    Duplicate {
        id: String,
        /// Name of the copy (defaults to "<name> (copy)")
        name: Option<String>,
    },
    /// Delete a slideshow with its backup
    Delete { id: String },
    /// Write a documented default config file
    InitConfig,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("shape").required(true).args(["point", "polygon", "rect"])))]
struct AddArgs {
    id: String,

    /// Circle centre
    #[arg(long, value_name = "X,Y", value_parser = position_arg)]
    point: Option<Position>,

    /// Circle radius (defaults to editor.default_point_radius)
    #[arg(long, requires = "point")]
    radius: Option<f64>,

    /// Polygon vertices
    #[arg(long, value_name = "X,Y", num_args = 3.., value_parser = position_arg)]
    polygon: Option<Vec<Position>>,

    /// Rectangle spanned by two opposite corners
    #[arg(long, value_name = "X1,Y1,X2,Y2", value_parser = rect_arg)]
    rect: Option<RectArg>,

    /// Text attached to the new annotation
    #[arg(long)]
    content: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct RectArg {
    from: Position,
    to: Position,
}

fn position_arg(raw: &str) -> Result<Position, String> {
    parse_position(raw).ok_or_else(|| format!("expected X,Y but got '{raw}'"))
}

fn rect_arg(raw: &str) -> Result<RectArg, String> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 4 {
        return Err(format!("expected X1,Y1,X2,Y2 but got '{raw}'"));
    }
    let from = position_arg(&format!("{},{}", parts[0], parts[1]))?;
    let to = position_arg(&format!("{},{}", parts[2], parts[3]))?;
    Ok(RectArg { from, to })
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Command::InitConfig = cli.command {
        let path = Config::create_default_file()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = Config::load()?;
    let options = storage::options_from_config(&config.storage, cli.storage_dir.as_deref())?;
    log::debug!("Using storage directory {}", options.base_dir.display());

    match cli.command {
        Command::New { name } => {
            let name = name.trim();
            if name.is_empty() {
                bail!("slideshow name must not be blank");
            }
            let slideshow = Slideshow::new(name);
            storage::save_slideshow(&slideshow, &options)?;
            println!("{}", slideshow.id());
        }
        Command::List => {
            let summaries = storage::list_slideshows(&options)?;
            if summaries.is_empty() {
                println!("No slideshows in {}", options.base_dir.display());
            }
            for summary in summaries {
                println!(
                    "{}\t{}\t{} annotations",
                    summary.id, summary.name, summary.annotation_count
                );
            }
        }
        Command::Show { id } => {
            let slideshow = storage::load_slideshow(&id, &options)?;
            println!("{} ({} annotations)", slideshow.name(), slideshow.len());
            for (index, annotation) in slideshow.iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{}",
                    index,
                    annotation.id(),
                    annotation.kind(),
                    annotation.content()
                );
            }
        }
        Command::Add(args) => add(args, &config, &options)?,
        Command::Edit { id, index, content } => {
            with_store(&id, &config, &options, |store, sidebar| {
                let target = annotation_at(store, index)?;
                sidebar.on_content_input(store, &target, content);
                sidebar.on_content_blur(store, &target);
                Ok(())
            })?;
        }
        Command::Remove { id, index } => {
            with_store(&id, &config, &options, |store, sidebar| {
                let target = annotation_at(store, index)?;
                sidebar.on_remove_click(store, &target);
                Ok(())
            })?;
        }
        Command::Move { id, from, to } => {
            with_store(&id, &config, &options, |store, sidebar| {
                sidebar.on_drag_end(
                    store,
                    DropResult {
                        source: from,
                        destination: Some(to),
                    },
                );
                Ok(())
            })?;
        }
        Command::Rename { id, name } => {
            if name.trim().is_empty() {
                bail!("slideshow name must not be blank");
            }
            with_store(&id, &config, &options, |store, sidebar| {
                sidebar.on_title_blur(store, &name);
                Ok(())
            })?;
        }
        Command::Export { id, output } => {
            let slideshow = storage::load_slideshow(&id, &options)?;
            let geojson = to_geojson_string(&slideshow)?;
            match output {
                Some(path) => write_output(&path, &geojson)?,
                None => println!("{geojson}"),
            }
        }
        #[cfg(feature = "render")]
        Command::Render {
            id,
            output,
            width,
            height,
        } => {
            let slideshow = storage::load_slideshow(&id, &options)?;
            let store = EditorStore::new(slideshow, &config.editor);
            let style = glissemontre::style::RenderStyle::from_config(&config.style);
            glissemontre::annotation::render_preview_png(
                store.slideshow(),
                store.selection(),
                &style,
                width,
                height,
                &output,
            )?;
            println!("Rendered preview to {}", output.display());
        }
        Command::Duplicate { id, name } => {
            let source = storage::load_slideshow(&id, &options)?;
            let name = match name {
                Some(name) if name.trim().is_empty() => bail!("slideshow name must not be blank"),
                Some(name) => name,
                None => format!("{} (copy)", source.name()),
            };
            let copy = source.duplicate(name);
            storage::save_slideshow(&copy, &options)?;
            println!("{}", copy.id());
        }
        Command::Delete { id } => {
            storage::delete_slideshow(&id, &options)?;
            println!("Deleted slideshow {id}");
        }
        // Written before the config is loaded
        Command::InitConfig => {}
    }

    Ok(())
}

fn add(args: AddArgs, config: &Config, options: &StorageOptions) -> Result<()> {
    let AddArgs {
        id,
        point,
        radius,
        polygon,
        rect,
        content,
    } = args;

    with_store(&id, config, options, |store, sidebar| {
        let outcome = match (point, polygon, rect) {
            (Some(at), _, _) => match radius {
                Some(radius) => editor::on_draw_complete(
                    store,
                    Geometry::point(at, radius),
                    AnnotationKind::Point,
                ),
                None => editor::on_point_placed(store, at),
            },
            (None, Some(vertices), _) => editor::on_draw_complete(
                store,
                Geometry::polygon(vertices),
                AnnotationKind::Polygon,
            ),
            (None, None, Some(RectArg { from, to })) => editor::on_draw_complete(
                store,
                Geometry::rectangle(from, to),
                AnnotationKind::Rectangle,
            ),
            (None, None, None) => bail!("one of --point, --polygon or --rect is required"),
        };

        let ApplyOutcome::Created(created) = outcome else {
            bail!("the shape was not added (invalid geometry or annotation limit reached)");
        };
        if let Some(content) = content {
            sidebar.on_content_input(store, created.id(), content);
            sidebar.on_content_blur(store, created.id());
        }
        println!("{}", created.id());
        Ok(())
    })
}

/// Loads a slideshow into an editor store, runs `edit`, and saves when the
/// slideshow changed.
fn with_store<F>(id: &str, config: &Config, options: &StorageOptions, edit: F) -> Result<()>
where
    F: FnOnce(&mut EditorStore, &mut SidebarController) -> Result<()>,
{
    let slideshow = storage::load_slideshow(id, options)?;
    let mut store = EditorStore::new(slideshow.clone(), &config.editor);
    let mut sidebar = SidebarController::new();

    edit(&mut store, &mut sidebar)?;

    if store.slideshow().ptr_eq(&slideshow) {
        println!("Nothing changed");
        return Ok(());
    }
    storage::save_slideshow(store.slideshow(), options)
        .with_context(|| format!("failed to save slideshow {id}"))?;
    Ok(())
}

fn annotation_at(store: &EditorStore, index: usize) -> Result<AnnotationId> {
    store
        .slideshow()
        .get(index)
        .map(|annotation| annotation.id().clone())
        .ok_or_else(|| {
            anyhow!(
                "slideshow {} has no annotation at index {} ({} annotations)",
                store.slideshow().id(),
                index,
                store.slideshow().len()
            )
        })
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Exported to {}", path.display());
    Ok(())
}
