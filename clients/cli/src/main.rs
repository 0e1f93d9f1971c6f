use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use directory::{
    capture::{
        decoder::ImageQrDecoder,
        payload::{parse_payload, to_vcard},
        session::import_photo,
    },
    consts::consts::PersonId,
    directory::{
        directory::Directory,
        options::DirectoryOptions,
        table::row::{UpdatePersonData, UpdateStatement},
    },
    export::csv::{default_file_name, write_csv},
    model::{person::PersonForm, photo::Photo},
    persistence::storage::StorageEngine,
    view::{
        controller::ListViewController,
        state::{SortKey, ViewMode},
    },
};

mod render;

/// 📇 Rolodex, a person directory stored on the local machine
#[derive(Parser, Debug)]
struct Cli {
    /// Location of the directory. Reads / writes to this directory. Note: Does not support shell paths, e.g. ~
    #[clap(short, long, default_value = "data")]
    data: PathBuf,

    /// Keep everything in memory, nothing is read from or written to disk
    #[clap(long)]
    memory: bool,

    /// Fill an empty directory with sample people
    #[clap(long)]
    seed: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Case insensitive match over name, email, role and phone
    #[clap(short, long, default_value = "")]
    search: String,

    /// Only show people with exactly this role
    #[clap(short, long)]
    role: Option<String>,

    /// name, email, role or date (newest first)
    #[clap(long, default_value = "name")]
    sort: SortKey,
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Page to show, starting at 1
    #[clap(short, long, default_value = "1")]
    page: usize,

    /// People per page, 1 to 100
    #[clap(long)]
    page_size: Option<usize>,

    /// grid or list
    #[clap(long, default_value = "grid")]
    view: ViewMode,

    /// Print the visible page as json
    #[clap(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PersonArgs {
    #[clap(long)]
    name: Option<String>,

    #[clap(long)]
    email: Option<String>,

    #[clap(long)]
    phone: Option<String>,

    #[clap(long)]
    role: Option<String>,

    /// Image file to embed, or a url
    #[clap(long)]
    photo: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a person
    Add(PersonArgs),

    /// List people a page at a time
    List {
        #[clap(flatten)]
        view: ViewArgs,

        #[clap(flatten)]
        page: PageArgs,
    },

    /// Search people by name, email, role or phone
    Search {
        term: String,

        #[clap(flatten)]
        page: PageArgs,
    },

    /// Show a single person
    Show {
        id: u64,

        #[clap(long)]
        json: bool,
    },

    /// Change some fields of a person, fields left out stay as they are
    Update {
        id: u64,

        #[clap(flatten)]
        person: PersonArgs,

        /// Go back to the default avatar
        #[clap(long, conflicts_with = "photo")]
        clear_photo: bool,
    },

    /// Remove a person
    Remove { id: u64 },

    /// Export the filtered list as csv
    Export {
        #[clap(flatten)]
        view: ViewArgs,

        /// Defaults to directory_<date>.csv in the current directory
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Totals for the whole directory
    Stats,

    /// Add the sample people
    Seed,

    /// Delete everyone
    Reset,

    /// Add a person from a QR code (vCard, json or mailto), flags fill in missing fields
    ImportQr {
        /// The decoded text, or @path to read it from a file
        #[clap(required_unless_present = "image")]
        payload: Option<String>,

        /// Png or jpeg holding the QR code
        #[clap(long, conflicts_with = "payload")]
        image: Option<PathBuf>,

        #[clap(flatten)]
        person: PersonArgs,
    },

    /// Print a vCard for a person, ready to be shown as a QR code
    Share { id: u64 },
}

fn photo_from_arg(photo: &str) -> anyhow::Result<Photo> {
    let is_link = ["http://", "https://", "data:"]
        .iter()
        .any(|prefix| photo.starts_with(prefix));

    if is_link {
        Ok(Photo::parse(photo)?)
    } else {
        Ok(import_photo(&PathBuf::from(photo))?)
    }
}

impl PersonArgs {
    /// Flags take precedence over what is already in `form`
    fn fill(self, mut form: PersonForm) -> anyhow::Result<PersonForm> {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
        if let Some(role) = self.role {
            form.role = role;
        }
        if let Some(photo) = self.photo {
            form.photo = Some(photo_from_arg(&photo)?);
        }

        Ok(form)
    }

    fn into_update(self, clear_photo: bool) -> anyhow::Result<UpdatePersonData> {
        let photo = match (&self.photo, clear_photo) {
            (_, true) => UpdateStatement::Unset,
            (Some(photo), false) => UpdateStatement::Set(photo_from_arg(photo)?),
            (None, false) => UpdateStatement::NoChanges,
        };

        Ok(UpdatePersonData {
            name: UpdateStatement::from_option(self.name),
            email: UpdateStatement::from_option(self.email),
            phone: UpdateStatement::from_option(self.phone),
            role: UpdateStatement::from_option(self.role),
            photo,
        })
    }
}

fn view_controller(
    directory: &Directory,
    view: &ViewArgs,
    page_size: Option<usize>,
) -> ListViewController {
    let mut controller =
        ListViewController::new(page_size.unwrap_or(directory.options().page_size));

    controller.load(directory.list());
    controller.set_search(&view.search);
    controller.set_role_filter(view.role.clone());
    controller.set_sort(view.sort);

    controller
}

fn show_page(controller: &mut ListViewController, page: PageArgs) -> anyhow::Result<()> {
    controller.set_view_mode(page.view);

    if !controller.go_to_page(page.page) && controller.total_pages() > 0 {
        log::warn!(
            "Page {} does not exist, showing page {}",
            page.page,
            controller.current_page()
        );
    }

    if page.json {
        println!("{}", serde_json::to_string_pretty(controller.visible())?);
    } else {
        render::page(controller);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let storage_engine = if args.memory {
        StorageEngine::Memory
    } else {
        StorageEngine::File(args.data)
    };

    let options = DirectoryOptions::default()
        .set_storage_engine(storage_engine)
        .set_seed_when_empty(args.seed);

    let mut directory = Directory::open(options).context("Unable to open the directory")?;

    match args.command {
        Command::Add(person) => {
            let form = person.fill(PersonForm::default())?;
            let person = directory.add(form)?;

            render::person(&person);
        }
        Command::List { view, page } => {
            let mut controller = view_controller(&directory, &view, page.page_size);

            show_page(&mut controller, page)?;
        }
        Command::Search { term, page } => {
            let view = ViewArgs {
                search: term,
                role: None,
                sort: SortKey::default(),
            };
            let mut controller = view_controller(&directory, &view, page.page_size);

            show_page(&mut controller, page)?;
        }
        Command::Show { id, json } => {
            let person = directory.get(PersonId(id))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&person)?);
            } else {
                render::person(&person);
            }
        }
        Command::Update {
            id,
            person,
            clear_photo,
        } => {
            let update = person.into_update(clear_photo)?;

            if update.is_empty() {
                bail!("Nothing to update, pass at least one field");
            }

            let person = directory.update(PersonId(id), update)?;

            render::person(&person);
        }
        Command::Remove { id } => {
            if !directory.delete(PersonId(id))? {
                bail!("Not found, record does not exist: {}", id);
            }
        }
        Command::Export { view, output } => {
            let controller = view_controller(&directory, &view, None);
            let path =
                output.unwrap_or_else(|| PathBuf::from(default_file_name(Local::now().date_naive())));

            let rows = write_csv(controller.filtered(), &path)?;

            println!("Exported {} people to {}", rows, path.display());
        }
        Command::Stats => {
            let controller = view_controller(
                &directory,
                &ViewArgs {
                    search: String::new(),
                    role: None,
                    sort: SortKey::default(),
                },
                None,
            );

            render::stats(&controller);
        }
        Command::Seed => {
            let seeded = directory.seed()?;

            println!("Seeded {} people", seeded);
        }
        Command::Reset => {
            directory.reset()?;
        }
        Command::ImportQr {
            payload,
            image,
            person,
        } => {
            let text = match (payload, image) {
                (_, Some(image)) => ImageQrDecoder::decode_file(&image)?
                    .with_context(|| format!("No QR code found in {}", image.display()))?,
                (Some(payload), None) => match payload.strip_prefix('@') {
                    Some(path) => fs::read_to_string(path)
                        .with_context(|| format!("Unable to read QR text from {}", path))?,
                    None => payload,
                },
                (None, None) => bail!("Pass the QR text or --image"),
            };

            let form = person.fill(parse_payload(&text)?)?;
            let person = directory.add(form)?;

            render::person(&person);
        }
        Command::Share { id } => {
            let person = directory.get(PersonId(id))?;

            println!("{}", to_vcard(&person));
        }
    }

    Ok(())
}
