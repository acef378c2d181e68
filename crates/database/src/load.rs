//! Transactional load of a [`DumpSet`].

use crate::Database;
use crate::error::{Result, SqlResultExt};
use pouet_dump::models::{Board, DumpDate, DumpSet, Group, Id, Party, Prod, UserRef};
use pouet_dump::{Milestone, Progress};
use sqlx::{Sqlite, Transaction};
use std::collections::HashSet;
use tracing::instrument;

/// Row counts of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub platforms: usize,
    pub users: usize,
    pub parties: usize,
    pub groups: usize,
    pub boards: usize,
    pub prods: usize,
    /// Junction, placing and credit rows.
    pub links: usize,
}

/// Ids that exist in the store once their table is loaded; references to
/// anything else are stored as `NULL` or dropped.
struct Known {
    users: HashSet<Id>,
    parties: HashSet<Id>,
    groups: HashSet<Id>,
    boards: HashSet<Id>,
}
impl Known {
    fn new(set: &DumpSet) -> Self {
        Self {
            users: set.users.keys().copied().collect(),
            parties: set.parties.iter().map(|party| party.id).collect(),
            groups: set.groups.iter().map(|group| group.id).collect(),
            boards: set.boards.iter().map(|board| board.id).collect(),
        }
    }

    fn user(&self, user: Option<&UserRef>) -> Option<Id> {
        user.map(UserRef::id).filter(|id| self.users.contains(id))
    }

    fn party(&self, id: Option<Id>) -> Option<Id> {
        id.filter(|id| self.parties.contains(id))
    }

    fn board(&self, id: Option<Id>) -> Option<Id> {
        id.filter(|id| self.boards.contains(id))
    }
}

impl Database {
    /// Replace the content of the store with `set` and record `date`, all in
    /// one transaction.
    ///
    /// Existing rows are deleted first, children before parents, then
    /// platforms, users, parties, groups, boards and prods are inserted so
    /// that every foreign key points at an existing row. On any failure the
    /// transaction is rolled back and nothing of this load is visible.
    #[instrument(skip_all, fields(target = %self.target(), date = %date))]
    pub async fn insert_tables(&self, set: &DumpSet, date: &DumpDate, progress: &dyn Progress) -> Result<LoadStats> {
        progress.emit(Milestone::StartTransaction);
        let known = Known::new(set);
        let mut stats = LoadStats::default();
        // Dropping the transaction without committing rolls it back.
        let mut tx = self.pool().begin().await.or_sql()?;
        sqlx::raw_sql(include_str!("../queries/clear_tables.sql")).execute(&mut *tx).await.or_sql()?;

        for platform in set.platforms.values() {
            sqlx::query(include_str!("../queries/insert_platform.sql"))
                .bind(platform.id)
                .bind(&platform.name)
                .bind(platform.icon.as_deref())
                .bind(platform.slug.as_deref())
                .execute(&mut *tx)
                .await
                .or_sql()?;
            stats.platforms += 1;
        }
        for user in set.users.values() {
            sqlx::query(include_str!("../queries/insert_user.sql"))
                .bind(user.id)
                .bind(&user.nickname)
                .bind(user.level.as_deref())
                .bind(user.avatar.as_deref())
                .bind(user.glops)
                .bind(user.register_date.as_deref())
                .execute(&mut *tx)
                .await
                .or_sql()?;
            stats.users += 1;
        }
        for party in &set.parties {
            insert_party(&mut tx, party, &known).await?;
            stats.parties += 1;
        }
        for group in &set.groups {
            insert_group(&mut tx, group, &known).await?;
            stats.groups += 1;
        }
        for board in &set.boards {
            stats.links += insert_board(&mut tx, board, &known).await?;
            stats.boards += 1;
        }
        for prod in &set.prods {
            stats.links += insert_prod(&mut tx, prod, &known).await?;
            stats.prods += 1;
        }

        sqlx::query(include_str!("../queries/upsert_version.sql"))
            .bind(date.to_string())
            .execute(&mut *tx)
            .await
            .or_sql()?;
        tx.commit().await.or_sql()?;
        progress.emit(Milestone::StopTransaction);
        tracing::info!(?stats, "loaded dumps");
        Ok(stats)
    }
}

async fn insert_party(tx: &mut Transaction<'_, Sqlite>, party: &Party, known: &Known) -> Result<()> {
    sqlx::query(include_str!("../queries/insert_party.sql"))
        .bind(party.id)
        .bind(&party.name)
        .bind(party.web.as_deref())
        .bind(known.user(party.added_user.as_ref()))
        .bind(party.added_date.as_deref())
        .execute(&mut **tx)
        .await
        .or_sql()?;
    Ok(())
}

async fn insert_group(tx: &mut Transaction<'_, Sqlite>, group: &Group, known: &Known) -> Result<()> {
    sqlx::query(include_str!("../queries/insert_demogroup.sql"))
        .bind(group.id)
        .bind(&group.name)
        .bind(group.acronym.as_deref())
        .bind(group.disambiguation.as_deref())
        .bind(group.web.as_deref())
        .bind(known.user(group.added_user.as_ref()))
        .bind(group.added_date.as_deref())
        .execute(&mut **tx)
        .await
        .or_sql()?;
    Ok(())
}

async fn insert_board(tx: &mut Transaction<'_, Sqlite>, board: &Board, known: &Known) -> Result<usize> {
    sqlx::query(include_str!("../queries/insert_board.sql"))
        .bind(board.id)
        .bind(&board.name)
        .bind(board.sysop.as_deref())
        .bind(board.phone_number.as_deref())
        .bind(known.user(board.added_user.as_ref()))
        .bind(board.added_date.as_deref())
        .execute(&mut **tx)
        .await
        .or_sql()?;
    for platform in &board.platforms {
        sqlx::query(include_str!("../queries/insert_board_platform.sql"))
            .bind(board.id)
            .bind(platform.id)
            .execute(&mut **tx)
            .await
            .or_sql()?;
    }
    Ok(board.platforms.len())
}

async fn insert_prod(tx: &mut Transaction<'_, Sqlite>, prod: &Prod, known: &Known) -> Result<usize> {
    sqlx::query(include_str!("../queries/insert_prod.sql"))
        .bind(prod.id)
        .bind(&prod.name)
        .bind(prod.kind.as_deref())
        .bind(prod.download.as_deref())
        .bind(prod.release_date.as_deref())
        .bind(known.user(prod.added_user.as_ref()))
        .bind(prod.added_date.as_deref())
        .bind(prod.vote_up)
        .bind(prod.vote_pig)
        .bind(prod.vote_down)
        .bind(prod.vote_avg)
        .bind(known.party(prod.party))
        .bind(prod.party_compo.as_deref())
        .bind(prod.party_place)
        .bind(prod.party_year)
        .bind(known.party(prod.invitation))
        .bind(prod.invitation_year)
        .bind(known.board(prod.board))
        .bind(prod.rank)
        .bind(prod.cdc)
        .execute(&mut **tx)
        .await
        .or_sql()?;
    let mut links = 0;
    for platform in &prod.platforms {
        sqlx::query(include_str!("../queries/insert_prod_platform.sql"))
            .bind(prod.id)
            .bind(platform.id)
            .execute(&mut **tx)
            .await
            .or_sql()?;
        links += 1;
    }
    for group in prod.groups.iter().filter(|id| known.groups.contains(*id)) {
        sqlx::query(include_str!("../queries/insert_prod_group.sql"))
            .bind(prod.id)
            .bind(*group)
            .execute(&mut **tx)
            .await
            .or_sql()?;
        links += 1;
    }
    for (position, placing) in (0u32..).zip(&prod.placings) {
        sqlx::query(include_str!("../queries/insert_prod_placing.sql"))
            .bind(prod.id)
            .bind(position)
            .bind(known.party(placing.party))
            .bind(placing.compo.as_deref())
            .bind(placing.ranking)
            .bind(placing.year)
            .execute(&mut **tx)
            .await
            .or_sql()?;
        links += 1;
    }
    for (position, credit) in (0u32..).zip(&prod.credits) {
        let Some(user) = known.user(Some(&credit.user)) else {
            tracing::debug!(prod = prod.id, user = credit.user.id(), "skipping credit of unknown user");
            continue;
        };
        sqlx::query(include_str!("../queries/insert_prod_credit.sql"))
            .bind(prod.id)
            .bind(position)
            .bind(user)
            .bind(credit.role.as_deref())
            .execute(&mut **tx)
            .await
            .or_sql()?;
        links += 1;
    }
    Ok(links)
}
