use std::path::PathBuf;

use clap::{Parser, Subcommand};
use classifieds_core::domain::ad::{CATEGORIES, LOCATIONS};
use classifieds_core::infrastructure::logging::init_logging;
use classifieds_core::{Ad, AdDraft, AppConfig, AppContext, Currency, SignupForm};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(name = "classifieds", about = "Post, browse and manage classified ads")]
struct Cli {
    /// Data file, overrides CLASSIFIEDS_DATA
    #[clap(short, long)]
    data: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct AdFields {
    #[clap(long)]
    title: Option<String>,
    #[clap(long)]
    category: Option<String>,
    #[clap(long)]
    price: Option<String>,
    /// Rs. or $
    #[clap(long)]
    currency: Option<Currency>,
    #[clap(long)]
    description: Option<String>,
    #[clap(long)]
    location: Option<String>,
    #[clap(long)]
    thumbnail: Option<String>,
    /// Detail image, repeat up to four times
    #[clap(long = "image")]
    images: Vec<String>,
}

impl AdFields {
    /// Overlays the given fields on `base`; images replace the whole list.
    fn into_draft(self, base: AdDraft) -> AdDraft {
        AdDraft {
            title: self.title.unwrap_or(base.title),
            category: self.category.unwrap_or(base.category),
            price: self.price.unwrap_or(base.price),
            currency: self.currency.unwrap_or(base.currency),
            description: self.description.unwrap_or(base.description),
            location: self.location.unwrap_or(base.location),
            thumbnail: self.thumbnail.or(base.thumbnail),
            images: if self.images.is_empty() {
                base.images
            } else {
                self.images
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    Signup {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        phone: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        confirm_password: String,
        #[clap(long)]
        profile_pic: Option<String>,
    },
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    Logout,
    Whoami,
    Post {
        #[clap(flatten)]
        fields: AdFields,
    },
    Edit {
        id: Uuid,
        #[clap(flatten)]
        fields: AdFields,
    },
    Delete {
        id: Uuid,
    },
    Show {
        id: Uuid,
    },
    List {
        #[clap(long)]
        location: Option<String>,
    },
    Mine,
    Search {
        #[clap(long)]
        query: Option<String>,
        #[clap(long)]
        category: Option<String>,
    },
    Categories,
    Locations,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(data) = args.data {
        config.data_file = data;
    }
    init_logging(&config);

    let app = AppContext::open(&config).await?;

    match args.command {
        Command::Signup {
            name,
            email,
            phone,
            password,
            confirm_password,
            profile_pic,
        } => {
            let profile = app
                .accounts
                .create_account(SignupForm {
                    name,
                    email,
                    phone,
                    password,
                    confirm_password,
                    profile_pic,
                })
                .await?;
            println!("Signup successful for {}. You can now log in.", profile.email);
        }
        Command::Login { email, password } => {
            let session = app.accounts.authenticate(&email, &password).await?;
            println!("Welcome, {}!", session.user.name);
        }
        Command::Logout => {
            app.accounts.clear_session().await?;
            println!("Logged out.");
        }
        Command::Whoami => match app.accounts.current_session().await? {
            Some(session) => println!(
                "{} <{}> phone {}",
                session.user.name, session.user.email, session.user.phone
            ),
            None => println!("Not logged in."),
        },
        Command::Post { fields } => {
            let session = app.accounts.require_session().await?;
            let draft = fields.into_draft(AdDraft::default());
            let ad = app.ads.create_ad(&session, draft).await?;
            println!("Ad posted! ID: {}", ad.id);
        }
        Command::Edit { id, fields } => {
            let session = app.accounts.require_session().await?;
            let current = app.ads.get_ad(id).await?;
            let draft = fields.into_draft(AdDraft::from(&current));
            let ad = app.ads.update_ad(&session, id, draft).await?;
            println!("Ad updated: {}", ad);
        }
        Command::Delete { id } => {
            let session = app.accounts.require_session().await?;
            if app.ads.remove_ad(&session, id).await? {
                println!("Ad deleted.");
            } else {
                println!("No ad with ID {}.", id);
            }
        }
        Command::Show { id } => {
            let ad = app.ads.get_ad(id).await?;
            print_details(&ad);
            match app.accounts.get_user(&ad.user_id).await {
                Ok(seller) => println!("Seller:      {} ({})", seller.name, seller.phone),
                Err(e) if e.is_not_found() => println!("Seller:      {}", ad.user_id),
                Err(e) => return Err(e.into()),
            }
        }
        Command::List { location } => {
            let ads = app
                .ads
                .filter_by_location(location.as_deref().unwrap_or_default())
                .await?;
            print_list(&ads);
        }
        Command::Mine => {
            let session = app.accounts.require_session().await?;
            let ads = app.ads.list_by_owner(session.email()).await?;
            print_list(&ads);
        }
        Command::Search { query, category } => {
            let ads = app
                .ads
                .search(query.as_deref(), category.as_deref())
                .await?;
            print_list(&ads);
        }
        Command::Categories => {
            for category in CATEGORIES {
                println!("{}", category);
            }
        }
        Command::Locations => {
            for location in LOCATIONS {
                println!("{}", location);
            }
        }
    }

    Ok(())
}

fn print_list(ads: &[Ad]) {
    if ads.is_empty() {
        println!("No ads found.");
        return;
    }
    println!("Ads ({})", ads.len());
    for ad in ads {
        println!("- {}", ad);
    }
}

fn print_details(ad: &Ad) {
    println!("{}", ad.title);
    println!("Price:       {} {}", ad.currency, ad.price);
    println!("Category:    {}", ad.category);
    println!("Location:    {}", ad.location);
    println!("Posted:      {}", ad.created_at.to_rfc3339());
    println!("Description: {}", ad.description);
    if let Some(thumbnail) = &ad.thumbnail {
        println!("Thumbnail:   {}", thumbnail);
    }
    for image in &ad.images {
        println!("Image:       {}", image);
    }
}
