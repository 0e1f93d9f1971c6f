use directory::{
    model::{person::Person, photo::Photo},
    view::{controller::ListViewController, state::ViewMode},
};
use num_format::{Locale, ToFormattedString};

fn photo_label(photo: &Photo) -> String {
    match photo {
        Photo::Url(url) => url.clone(),
        Photo::Embedded { mime, data } => format!("embedded {} ({} bytes)", mime, data.len()),
    }
}

fn registered(person: &Person) -> String {
    person
        .registered_at
        .with_timezone(&chrono::Local)
        .format("%d/%m/%Y")
        .to_string()
}

pub fn person(person: &Person) {
    println!("#{} {}", person.id, person.name);
    println!("   Email:      {}", person.email);
    println!("   Phone:      {}", person.phone);
    println!("   Role:       {}", person.role);
    println!("   Registered: {}", registered(person));
    println!("   Photo:      {}", photo_label(&person.photo));
}

fn card(person: &Person) {
    println!("┌ #{} {}", person.id, person.name);
    println!("│ {} · {}", person.role, person.email);
    println!("└ {} · {}", person.phone, registered(person));
}

fn row(person: &Person) {
    println!(
        "{:>5}  {:<30} {:<35} {:<16} {:<14} {}",
        person.id,
        person.name,
        person.email,
        person.phone,
        person.role,
        registered(person)
    );
}

pub fn page(controller: &ListViewController) {
    let visible = controller.visible();

    match controller.state().view_mode {
        ViewMode::Grid => visible.iter().for_each(card),
        ViewMode::List => {
            println!(
                "{:>5}  {:<30} {:<35} {:<16} {:<14} {}",
                "Id", "Name", "Email", "Phone", "Role", "Registered"
            );
            visible.iter().for_each(row);
        }
    }

    let pagination = controller.pagination();

    if pagination.total_pages > 0 {
        println!();
        println!("{}", pagination.render());
    }

    println!("{}", pagination.page_info());
}

pub fn stats(controller: &ListViewController) {
    let stats = controller.stats();

    println!("Total:    {}", stats.total.to_formatted_string(&Locale::en));
    println!("Today:    {}", stats.today.to_formatted_string(&Locale::en));
    println!("Filtered: {}", stats.filtered.to_formatted_string(&Locale::en));
    println!("Roles:    {}", controller.roles().join(", "));
}
