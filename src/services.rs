use crate::booking_client::BookingClient;
use crate::errors::AppError;
use crate::joke_client::JokeClient;
use crate::models::Student;
use crate::student_repository::StudentRepository;

/// Registers students and enriches them with a booking id and a joke.
#[derive(Clone)]
pub struct StudentService {
    repository: StudentRepository,
    joke_client: JokeClient,
    booking_client: BookingClient,
}

impl StudentService {
    pub fn new(
        repository: StudentRepository,
        joke_client: JokeClient,
        booking_client: BookingClient,
    ) -> Self {
        Self {
            repository,
            joke_client,
            booking_client,
        }
    }

    /// Books a slot, fetches a joke, attaches both to `student` and stores it.
    ///
    /// The booking is requested before the joke. When either call fails the
    /// error is returned and nothing is stored. On success the generated id is
    /// written back into `student`.
    pub async fn add_student(&self, student: &mut Student) -> Result<(), AppError> {
        tracing::info!("Registering student {} <{}>", student.name, student.email);

        let booking_id = self.booking_client.create_booking(&student.name).await?;
        let joke = self.joke_client.get_joke().await?;

        student.booking_id = Some(booking_id);
        student.joke = Some(joke.value);

        let saved = self.repository.save(student).await?;
        *student = saved;

        tracing::info!(
            "✓ Student {:?} saved with booking {}",
            student.id,
            booking_id
        );
        Ok(())
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound(id))
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        self.repository.find_all().await
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete_by_id(id).await? {
            return Err(AppError::StudentNotFound(id));
        }
        tracing::info!("Deleted student {}", id);
        Ok(())
    }
}
