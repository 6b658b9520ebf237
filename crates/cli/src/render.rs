//! Terminal tables for the explorer pages.

use archive_explorer_data::{DisplayKind, FileView};
use archive_explorer_domain::entities::{
    Block, FileProvingWindow, StorageContract, Transaction, WalletBalance, WalletDetails,
};
use archive_explorer_domain::format::{
    base64_to_hex, format_bytes, format_coins, format_storage, last_segment,
    parse_backend_timestamp, short_id,
};
use archive_explorer_domain::metrics::ChartPoint;
use archive_explorer_domain::value_objects::ArchivedFileName;
use archive_explorer_sync::prelude::{NetworkStats, RecentTransaction};
use prettytable::{Table, row};

const NO_DATA: &str = "No data";

fn timestamp(raw: &str) -> String {
    parse_backend_timestamp(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn key_value(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    for (key, value) in rows {
        table.add_row(row![b->key, value]);
    }
    table
}

fn print_or_placeholder(table: &Table, rows: usize) {
    if rows == 0 {
        println!("{NO_DATA}");
    } else {
        table.printstd();
    }
}

pub fn print_stats(stats: &NetworkStats, latest_height: Option<u64>) {
    let latest = latest_height.map_or_else(|| "-".to_string(), |h| h.to_string());
    key_value(&[
        ("Latest block", latest),
        ("Archived storage", format_storage(stats.archived_storage)),
        ("Storage contracts", stats.total_contracts.normalize().to_string()),
        ("Coins in circulation", format_coins(stats.total_coins)),
        ("Stored files", stats.total_stored_files.normalize().to_string()),
    ])
    .printstd();
}

pub fn print_blocks(blocks: &[Block]) {
    let mut table = Table::new();
    table.set_titles(row!["Height", "Hash", "Time", "Txs", "Miner"]);
    for block in blocks {
        table.add_row(row![
            r->block.height,
            short_id(&block.hash),
            timestamp(&block.time_stamp),
            r->block.transactions.len(),
            short_id(&block.miner_public_key)
        ]);
    }
    print_or_placeholder(&table, blocks.len());
}

pub fn print_block(block: &Block) {
    key_value(&[
        ("Height", block.height.to_string()),
        ("Hash", block.hash.clone()),
        (
            "Previous hash",
            block.previous_hash.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Time", timestamp(&block.time_stamp)),
        ("Miner", block.miner_public_key.clone()),
        ("Quality", block.quality.to_string()),
        ("Winning file", block.pos_proof.winning_filename.clone()),
        ("Challenge", block.pos_proof.challenge.clone()),
        ("Timelord", block.pot_proof.public_key_timelord.clone()),
        ("VDF iterations", block.pot_proof.t.to_string()),
    ])
    .printstd();

    println!("\nTransactions");
    let mut table = Table::new();
    table.set_titles(row!["ID", "Type", "Summary"]);
    for tx in &block.transactions {
        table.add_row(row![
            tx.id().map_or_else(|| "-".to_string(), short_id),
            tx.kind(),
            summary(tx)
        ]);
    }
    print_or_placeholder(&table, block.transactions.len());
}

/// One-line description of a transaction.
fn summary(tx: &Transaction) -> String {
    match tx {
        Transaction::CurrencyTransaction(t) => format!(
            "{} -> {}: {}",
            short_id(&t.sender_address),
            short_id(&t.receiver_address),
            format_coins(t.amount)
        ),
        Transaction::FileProof(p) => p
            .file_proof
            .as_ref()
            .map(|f| format!("proof for {}", ArchivedFileName::from_file_url(&f.file_url)))
            .unwrap_or_else(|| "proof".to_string()),
        Transaction::StorageContractSubmission(s) => s
            .contract
            .as_ref()
            .map(|c| format!("contract for {}", ArchivedFileName::from_file_url(&c.file_url)))
            .unwrap_or_else(|| "contract".to_string()),
    }
}

/// Detail rows of a transaction, by kind.
pub fn transaction_rows(tx: &Transaction) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("ID", tx.id().unwrap_or("-").to_string()),
        ("Type", tx.kind().to_string()),
    ];
    match tx {
        Transaction::CurrencyTransaction(t) => {
            rows.push(("Sender", t.sender_address.clone()));
            rows.push(("Receiver", t.receiver_address.clone()));
            rows.push(("Amount", format_coins(t.amount)));
            if let Some(signature) = &t.signature {
                rows.push(("Signature", short_id(signature)));
            }
        }
        Transaction::FileProof(p) => {
            if let Some(proof) = &p.file_proof {
                rows.push(("File", ArchivedFileName::from_file_url(&proof.file_url).display()));
                rows.push(("Contract", base64_to_hex(&proof.storage_contract_hash)));
                rows.push(("Merkle proof", format!("{} nodes", proof.merkle_proof.len())));
                if let (Some(start), Some(end)) = (proof.start_block_index, proof.end_block_index) {
                    rows.push(("Window", format!("{start} - {end}")));
                }
            }
            if let Some(storer) = &p.storer_public_key {
                rows.push(("Storer", short_id(storer)));
            }
        }
        Transaction::StorageContractSubmission(s) => {
            if let Some(contract) = &s.contract {
                rows.push(("File", ArchivedFileName::from_file_url(&contract.file_url).display()));
                rows.push(("Value", format_coins(contract.value)));
                rows.push(("Storer", contract.storer_address.clone()));
                rows.push(("Hash", base64_to_hex(&contract.hash)));
            }
        }
    }
    rows
}

pub fn print_transaction(block: &Block, tx: &Transaction) {
    let mut rows = vec![("Block", block.height.to_string())];
    rows.extend(transaction_rows(tx));
    key_value(&rows).printstd();
}

pub fn print_recent_transactions(recent: &[RecentTransaction]) {
    let mut table = Table::new();
    table.set_titles(row!["Block", "ID", "Type", "Summary"]);
    for item in recent {
        table.add_row(row![
            r->item.block_height,
            item.transaction.id().map_or_else(|| "-".to_string(), short_id),
            item.transaction.kind(),
            summary(&item.transaction)
        ]);
    }
    print_or_placeholder(&table, recent.len());
}

pub fn print_wallets(wallets: &[WalletBalance]) {
    let mut table = Table::new();
    table.set_titles(row!["Address", "Balance"]);
    for w in wallets {
        table.add_row(row![w.wallet_address, r->format_coins(w.balance)]);
    }
    print_or_placeholder(&table, wallets.len());
}

pub fn print_wallet(details: &WalletDetails) {
    key_value(&[
        ("Address", details.address.clone()),
        ("Public key", short_id(&details.public_key)),
        ("Balance", format_coins(details.balance)),
        ("Blocks won", details.won_blocks.len().to_string()),
        ("Total storage", format_storage(details.total_storage())),
    ])
    .printstd();

    println!("\nTransactions");
    let mut table = Table::new();
    table.set_titles(row!["ID", "Type", "Summary"]);
    for tx in &details.transactions {
        table.add_row(row![tx.id().unwrap_or("-"), tx.kind(), summary(tx)]);
    }
    print_or_placeholder(&table, details.transactions.len());

    println!("\nStorage contracts");
    print_contracts(&details.storage_contracts);
}

pub fn print_stored_files(files: &[String]) {
    let mut table = Table::new();
    table.set_titles(row!["File", "Captured"]);
    for file in files {
        let name = ArchivedFileName::parse(last_segment(file));
        table.add_row(row![name.name, name.display()]);
    }
    print_or_placeholder(&table, files.len());
}

pub fn print_contracts(contracts: &[StorageContract]) {
    let mut table = Table::new();
    table.set_titles(row!["File", "Date", "Size", "Value", "Type", "Hash"]);
    for c in contracts {
        let file = c.archived_file();
        table.add_row(row![
            file.name,
            file.listing_date().unwrap_or_else(|| "-".to_string()),
            r->format_bytes(c.file_length),
            r->format_coins(c.value),
            c.storage_type,
            short_id(&c.hash_hex())
        ]);
    }
    print_or_placeholder(&table, contracts.len());
}

pub fn print_contract(contract: &StorageContract) {
    let file = contract.archived_file();
    key_value(&[
        ("File", file.display()),
        ("File URL", contract.file_url.clone()),
        ("Hash", contract.hash_hex()),
        ("Merkle root", contract.merkle_root.clone()),
        ("Storer", contract.storer_address.clone()),
        ("Date", timestamp(&contract.timestamp)),
        ("Size", format_bytes(contract.file_length)),
        ("Value", format_coins(contract.value)),
        ("Proof frequency", contract.proof_frequency.to_string()),
        ("Window size", contract.window_size.to_string()),
        ("Storage type", contract.storage_type.to_string()),
    ])
    .printstd();
}

pub fn print_proving_windows(windows: &[FileProvingWindow]) {
    let mut table = Table::new();
    table.set_titles(row!["Start", "End", "State", "Challenge"]);
    for w in windows {
        table.add_row(row![
            r->w.start_block_index,
            r->w.end_block_index,
            w.state,
            short_id(&w.po_dp_challenge)
        ]);
    }
    print_or_placeholder(&table, windows.len());
}

pub fn print_mined_coins(points: &[ChartPoint]) {
    let mut table = Table::new();
    table.set_titles(row!["Bucket", "Mined", "Total"]);
    for p in points {
        table.add_row(row![
            p.bucket_start.format("%Y-%m-%d %H:%M"),
            r->format_coins(p.amount),
            r->format_coins(p.cumulative)
        ]);
    }
    print_or_placeholder(&table, points.len());
}

/// Prints a retrieved file the way its display kind allows.
pub fn print_file(view: &FileView, storage_url: &str) {
    key_value(&[
        ("File", ArchivedFileName::parse(&view.file_name).display()),
        ("Type", view.type_label()),
        ("Size", format_bytes(view.bytes.len() as u64)),
    ])
    .printstd();

    match view.kind {
        DisplayKind::Json => println!("{}", view.pretty_json().unwrap_or_else(|| view.text())),
        DisplayKind::Text => println!("{}", view.text()),
        DisplayKind::Html => println!("{}", view.rebased_html(storage_url)),
        DisplayKind::Pdf | DisplayKind::Image | DisplayKind::Unsupported => {
            println!("Binary content, use --output to save it");
        }
    }
}
