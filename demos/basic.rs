use docmatch::{search, similarity, Config, Decision, ScanService};

fn main() -> docmatch::Result<()> {
    // plain search over (key, text) pairs
    let docs = vec![
        ("fox.txt", "The quick brown fox jumps over the lazy dog."),
        ("fruit.txt", "Apples, bananas and cherries."),
        ("dog.txt", "A lazy dog sleeps all day."),
    ];
    let hits = search("lazy dog", &docs).map_keys(|doc| doc.0);
    println!("Search Results: \n{}", hits);
    println!("similarity = {:.3}", similarity("Hello, World!", "hello world"));

    // the same through the service layer
    let mut service = ScanService::in_memory(&Config::default());
    service.open_account("admin", "Admin", true)?;
    service.open_account("alice", "Alice", false)?;
    for (name, text) in &docs {
        service.upload("alice", name, text.to_string())?;
    }

    let hits = service.scan("alice", "quick fox")?;
    for hit in &hits {
        println!("{} [{}] {}", hit.percent(), hit.match_level(), hit.key.name);
    }

    let request = service.request_credits("alice", 5)?;
    service.review_credit_request("admin", &request, Decision::Approve)?;
    println!(
        "alice has {} credits",
        service.account("alice")?.credits_remaining
    );

    let stats = service.analytics("admin")?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
